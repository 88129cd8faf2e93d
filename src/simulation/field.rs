//! Named force laws and the pairwise formula contract.
//!
//! A `Field` is the extension point for physical laws: it owns an optional
//! [`Formula`] that maps two particles to a pairwise force vector. The
//! formula must be pure, and antisymmetric under swapping its particle
//! arguments; the engine relies on that contract to apply equal and
//! opposite contributions from a single evaluation per unordered pair.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::simulation::force::Force;
use crate::simulation::particle::Particle;
use crate::simulation::vector::{Precision, Scalar, Tensor, Vector};
use crate::store::store::GroupId;

/// Everything a formula may consult about the field it is evaluated for:
/// the field itself plus each particle's combined force for it. Missing
/// forces are `None` so formulas can degrade to a zero force
pub struct FieldContext<'a> {
    pub field: &'a Field,
    pub force_a: Option<&'a Force>,
    pub force_b: Option<&'a Force>,
}

/// Pairwise force law.
///
/// `evaluate(a, b, …)` returns the force vector acting on `a` due to `b`;
/// swapping the particle arguments must negate the result. Implementations
/// must not mutate anything
pub trait Formula: Send + Sync {
    fn evaluate(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector>;
}

/// A registered force law: store-assigned id, name, optional formula, and
/// a unit label for the magnitudes ensembles carry in it
#[derive(Clone)]
pub struct Field {
    id: GroupId,
    pub name: String,
    formula: Option<Arc<dyn Formula>>,
    pub units: Option<String>,
}

impl Field {
    pub fn new(
        id: GroupId,
        name: impl Into<String>,
        formula: Option<Arc<dyn Formula>>,
        units: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            formula,
            units: units.map(str::to_owned),
        }
    }

    pub fn id(&self) -> &GroupId {
        &self.id
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Attach (or replace) the formula after registration
    pub fn assign_formula(&mut self, formula: Arc<dyn Formula>) {
        self.formula = Some(formula);
    }

    /// Factory for the force an ensemble experiences in this field, at the
    /// default relative center
    pub fn has(&self, magnitude: Scalar) -> Force {
        self.has_at(magnitude, Tensor::Scalar(default_relative_center()))
    }

    /// Factory with an explicit relative center
    pub fn has_at(&self, magnitude: Scalar, relative_center: Tensor) -> Force {
        Force::new(self.id.clone(), magnitude, relative_center)
    }

    /// Evaluate the pairwise formula; a field with no formula contributes
    /// a zero force
    pub fn calculate_force(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector> {
        match &self.formula {
            None => Ok(Vector::new(vec![Scalar::from(0u32)])),
            Some(formula) => formula.evaluate(particle_a, particle_b, context, precision),
        }
    }

    pub fn dumps(&self) -> FieldDump {
        FieldDump {
            id: self.id.clone(),
            name: self.name.clone(),
            units: self.units.clone(),
        }
    }
}

/// Halfway between the two interacting bodies
fn default_relative_center() -> Scalar {
    Scalar::from(5u32) / Scalar::from(10u32)
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("formula", &self.formula.is_some())
            .field("units", &self.units)
            .finish()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={}", self.name, self.id)
    }
}

/// Wire shape of a field registration. Formulas are code, not data, and
/// are re-attached with `Engine::assign_field` after a reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDump {
    pub id: GroupId,
    pub name: String,
    pub units: Option<String>,
}
