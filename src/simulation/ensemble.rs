//! Named particle species: a merged bag of per-field forces plus a rest
//! energy.
//!
//! Construction folds all same-field forces via pairwise combination, so a
//! built ensemble holds at most one force per field id.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::simulation::force::{Force, ForceDump};
use crate::simulation::vector::{Precision, Scalar};
use crate::store::store::GroupId;

#[derive(Debug, Clone)]
pub struct Ensemble {
    id: GroupId,
    name: String,
    forces: Vec<Force>,
    rest_energy: Scalar,
}

impl Ensemble {
    /// Build an ensemble, merging same-field forces until each field id
    /// has exactly one resulting force
    pub fn new(
        id: GroupId,
        name: impl Into<String>,
        forces: Vec<Force>,
        rest_energy: Scalar,
        precision: Precision,
    ) -> EngineResult<Self> {
        let mut ensemble = Self {
            id,
            name: name.into(),
            forces: Vec::new(),
            rest_energy,
        };
        for force in forces {
            ensemble.add_force(force, precision)?;
        }
        Ok(ensemble)
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rest_energy(&self) -> &Scalar {
        &self.rest_energy
    }

    /// Merged forces, one per participating field
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    /// Append a force, merging it into the existing one when the field is
    /// already represented. Individual forces are never removed; clearing
    /// happens at the whole-ensemble level
    pub fn add_force(&mut self, force: Force, precision: Precision) -> EngineResult<()> {
        let mut merged: IndexMap<GroupId, Force> = self
            .forces
            .drain(..)
            .map(|existing| (existing.field().clone(), existing))
            .collect();
        match merged.entry(force.field().clone()) {
            Entry::Occupied(mut entry) => {
                let combined = entry.get().combine(&force, precision)?;
                entry.insert(combined);
            }
            Entry::Vacant(entry) => {
                entry.insert(force);
            }
        }
        self.forces = merged.into_values().collect();
        Ok(())
    }

    /// The combined force this ensemble experiences in one field
    pub fn force_for(&self, field: &GroupId) -> Option<&Force> {
        self.forces.iter().find(|force| force.field() == field)
    }

    pub fn dumps(&self) -> EnsembleDump {
        use bigdecimal::ToPrimitive;
        EnsembleDump {
            id: self.id.clone(),
            name: self.name.clone(),
            forces: self.forces.iter().map(Force::dumps).collect(),
            rest_energy: self.rest_energy.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.id)
    }
}

/// Wire shape of an ensemble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleDump {
    pub id: GroupId,
    pub name: String,
    pub forces: Vec<ForceDump>,
    pub rest_energy: f64,
}
