//! The engine: registries, the tick loop, and the structural dump.
//!
//! Owns the entity/group/attribute store, simulated time, and the decimal
//! precision every arithmetic operation runs at. Fields and ensembles are
//! group attributes; particles are objects attached to the groups of the
//! fields their ensemble carries forces for.
//!
//! One `animate(dt)` tick runs in two phases:
//! 1. force accumulation – for every field, every unordered pair of member
//!    particles is evaluated once; the pair's force vector divided by each
//!    particle's own per-field force magnitude lands in a side buffer
//! 2. integration – each particle advances position and velocity by the
//!    Taylor series and clears its acceleration
//!
//! The buffer guarantees accumulation completes before any kinematics are
//! read, which is also the reduction seam a parallel force phase would
//! need.

use std::sync::Arc;

use bigdecimal::Zero;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::simulation::ensemble::{Ensemble, EnsembleDump};
use crate::simulation::field::{Field, FieldContext, FieldDump, Formula};
use crate::simulation::force::{Force, TensorDump};
use crate::simulation::integrator::taylor_advance;
use crate::simulation::kinematics::Kinematics;
use crate::simulation::particle::{Particle, ParticleDump};
use crate::simulation::vector::{decimalize, Precision, Scalar, Tensor, Vector};
use crate::store::store::{GroupId, Ludus, ObjectId, Priority};

/// What a group means to the engine: a force field or a particle species
#[derive(Debug, Clone)]
pub enum GroupTag {
    Field(Field),
    Ensemble(Ensemble),
}

impl GroupTag {
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            GroupTag::Field(field) => Some(field),
            GroupTag::Ensemble(_) => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            GroupTag::Field(field) => Some(field),
            GroupTag::Ensemble(_) => None,
        }
    }

    pub fn as_ensemble(&self) -> Option<&Ensemble> {
        match self {
            GroupTag::Field(_) => None,
            GroupTag::Ensemble(ensemble) => Some(ensemble),
        }
    }
}

pub struct Engine {
    store: Ludus<Particle, GroupTag>,
    time: Scalar,
    precision: Precision,
}

impl Engine {
    pub fn new(precision: Precision) -> Self {
        Self {
            store: Ludus::new(),
            time: Scalar::from(0u32),
            precision,
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Simulated time accumulated across ticks
    pub fn time(&self) -> &Scalar {
        &self.time
    }

    /// Read access to the backing store
    pub fn store(&self) -> &Ludus<Particle, GroupTag> {
        &self.store
    }

    // ---------------------------------------------------------------------
    // Fields
    // ---------------------------------------------------------------------

    /// Register a force law under a fresh group id
    pub fn add_field(
        &mut self,
        name: &str,
        formula: Option<Arc<dyn Formula>>,
        units: Option<&str>,
    ) -> GroupId {
        let id = self.store.new_group();
        let field = Field::new(id.clone(), name, formula, units);
        self.store.set_attribute(&id, GroupTag::Field(field));
        info!(id = %id, name, "field registered");
        id
    }

    /// Attach a formula (and optionally a unit label) to a field that was
    /// registered without one
    pub fn assign_field(
        &mut self,
        id: &GroupId,
        formula: Arc<dyn Formula>,
        units: Option<&str>,
    ) -> EngineResult<()> {
        let field = self
            .store
            .attribute_mut(id)
            .and_then(GroupTag::as_field_mut)
            .ok_or_else(|| EngineError::UnknownGroup(id.clone()))?;
        field.assign_formula(formula);
        if units.is_some() {
            field.units = units.map(str::to_owned);
        }
        Ok(())
    }

    pub fn field(&self, id: &GroupId) -> Option<&Field> {
        self.store.attribute(id).and_then(GroupTag::as_field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.store
            .attributes()
            .filter_map(|(_, tag)| tag.as_field())
    }

    // ---------------------------------------------------------------------
    // Ensembles
    // ---------------------------------------------------------------------

    /// Register a particle species. Same-field forces merge during
    /// construction
    pub fn add_ensemble(
        &mut self,
        name: &str,
        forces: Vec<Force>,
        rest_energy: Scalar,
    ) -> EngineResult<GroupId> {
        let id = self.store.new_group();
        let ensemble = Ensemble::new(id.clone(), name, forces, rest_energy, self.precision)?;
        self.store.set_attribute(&id, GroupTag::Ensemble(ensemble));
        info!(id = %id, name, "ensemble registered");
        Ok(id)
    }

    pub fn ensemble(&self, id: &GroupId) -> Option<&Ensemble> {
        self.store.attribute(id).and_then(GroupTag::as_ensemble)
    }

    pub fn ensembles(&self) -> impl Iterator<Item = &Ensemble> {
        self.store
            .attributes()
            .filter_map(|(_, tag)| tag.as_ensemble())
    }

    /// Unregister one ensemble by id
    pub fn remove_ensemble(&mut self, id: &GroupId) -> EngineResult<()> {
        if self.ensemble(id).is_none() {
            return Err(EngineError::UnknownGroup(id.clone()));
        }
        self.store.clear_attributes(id)?;
        Ok(())
    }

    /// Unregister every ensemble with the given name; returns how many
    /// were cleared
    pub fn remove_ensembles_named(&mut self, name: &str) -> EngineResult<usize> {
        let ids: Vec<GroupId> = self
            .ensembles()
            .filter(|ensemble| ensemble.name() == name)
            .map(|ensemble| ensemble.id().clone())
            .collect();
        for id in &ids {
            self.store.clear_attributes(id)?;
        }
        Ok(ids.len())
    }

    // ---------------------------------------------------------------------
    // Particles
    // ---------------------------------------------------------------------

    /// Create a particle of the given ensemble and attach it to the group
    /// of every field the ensemble carries a force for.
    ///
    /// An ensemble with a zero-magnitude force is rejected here: such a
    /// particle would divide by zero the first time its field is
    /// evaluated, so the attachment itself is the contract violation
    pub fn add_particle(
        &mut self,
        position: Vector,
        kinematics: Kinematics,
        ensemble: &GroupId,
    ) -> EngineResult<ObjectId> {
        let species = self
            .ensemble(ensemble)
            .ok_or_else(|| EngineError::UnknownGroup(ensemble.clone()))?;
        let mut field_ids = Vec::with_capacity(species.forces().len());
        for force in species.forces() {
            if force.magnitude().is_zero() {
                return Err(EngineError::ZeroMagnitude {
                    field: force.field().clone(),
                });
            }
            field_ids.push(force.field().clone());
        }

        let id = self.store.new_object();
        let particle = Particle::new(id.clone(), position, kinematics, ensemble.clone());
        self.store.set_properties(&id, particle)?;
        self.store.attach_group(&id, &field_ids)?;
        info!(id = %id, ensemble = %ensemble, "particle added");
        Ok(id)
    }

    pub fn particle(&self, id: &ObjectId) -> Option<&Particle> {
        self.store.properties(id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.store
            .object_ids()
            .filter_map(|id| self.store.properties(id))
    }

    /// Remove a particle, detaching it from every field group it belonged
    /// to; groups left empty disappear along with their attributes
    pub fn remove_particle(&mut self, id: &ObjectId) -> EngineResult<()> {
        self.store.remove_object(id)?;
        Ok(())
    }

    /// The particle's combined force for one field, resolved through its
    /// ensemble
    fn combined_force(&self, particle: &Particle, field: &GroupId) -> EngineResult<&Force> {
        let ensemble = self
            .ensemble(particle.ensemble())
            .ok_or_else(|| EngineError::UnknownGroup(particle.ensemble().clone()))?;
        ensemble
            .force_for(field)
            .ok_or_else(|| EngineError::MissingForce {
                ensemble: particle.ensemble().clone(),
                field: field.clone(),
            })
    }

    // ---------------------------------------------------------------------
    // The tick
    // ---------------------------------------------------------------------

    /// Advance the simulation by `dt`.
    ///
    /// Fields are processed in registration order, pairs within a field in
    /// member-index order, and integration in store-iteration order, so a
    /// run is deterministic. A failed tick leaves the engine inconsistent
    /// and must be treated as unrecoverable
    pub fn animate(&mut self, dt: Scalar) -> EngineResult<()> {
        self.time += dt.clone();
        let precision = self.precision;

        // Phase 1: accumulate accelerations into a side buffer. Nothing
        // in the store mutates until every pair has been evaluated
        let mut accelerations: IndexMap<ObjectId, Vector> = IndexMap::new();
        let mut pairs = 0usize;
        for (group_id, members) in self.store.groups() {
            let Some(field) = self.store.attribute(group_id).and_then(GroupTag::as_field) else {
                continue;
            };
            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let particle_a = self
                        .store
                        .properties(&members[i])
                        .ok_or_else(|| EngineError::UnknownObject(members[i].clone()))?;
                    let particle_b = self
                        .store
                        .properties(&members[j])
                        .ok_or_else(|| EngineError::UnknownObject(members[j].clone()))?;

                    let force_a = self.combined_force(particle_a, group_id)?;
                    let force_b = self.combined_force(particle_b, group_id)?;
                    if force_a.magnitude().is_zero() || force_b.magnitude().is_zero() {
                        return Err(EngineError::ZeroMagnitude {
                            field: group_id.clone(),
                        });
                    }

                    let context = FieldContext {
                        field,
                        force_a: Some(force_a),
                        force_b: Some(force_b),
                    };
                    let force_vector =
                        field.calculate_force(particle_a, particle_b, &context, precision)?;

                    // The formula gives the force on the first particle;
                    // the second feels the negation (antisymmetry contract)
                    let acceleration_a = force_vector
                        .div(&Tensor::Scalar(force_a.magnitude().clone()), precision)?;
                    let acceleration_b = force_vector
                        .neg()
                        .div(&Tensor::Scalar(force_b.magnitude().clone()), precision)?;

                    accelerations
                        .entry(members[i].clone())
                        .or_insert_with(Vector::empty)
                        .add_assign(&Tensor::Vector(acceleration_a));
                    accelerations
                        .entry(members[j].clone())
                        .or_insert_with(Vector::empty)
                        .add_assign(&Tensor::Vector(acceleration_b));
                    pairs += 1;
                }
            }
        }

        for (id, acceleration) in accelerations {
            let particle = self
                .store
                .properties_mut(&id)
                .ok_or_else(|| EngineError::UnknownObject(id.clone()))?;
            particle.kinematics.add_motion(acceleration, 2)?;
        }

        // Phase 2: every particle advances independently
        let ids: Vec<ObjectId> = self.store.object_ids().cloned().collect();
        for id in &ids {
            let particle = self
                .store
                .properties_mut(id)
                .ok_or_else(|| EngineError::UnknownObject(id.clone()))?;
            taylor_advance(particle, &dt, precision)?;
        }

        debug!(time = %self.time, pairs, particles = ids.len(), "tick complete");
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Structural dump
    // ---------------------------------------------------------------------

    /// Nested structural dump with all scalars as lossy floats
    pub fn dumps(&self) -> EngineResult<EngineDump> {
        let mut particles = Vec::new();
        for particle in self.particles() {
            let ensemble = self
                .ensemble(particle.ensemble())
                .ok_or_else(|| EngineError::UnknownGroup(particle.ensemble().clone()))?;
            particles.push(particle.dumps(ensemble.dumps()));
        }
        Ok(EngineDump {
            particles,
            fields: self.fields().map(Field::dumps).collect(),
            ensembles: self.ensembles().map(Ensemble::dumps).collect(),
        })
    }

    /// Advance, then dump: the combined pass-through for process
    /// boundaries that want one round trip per tick
    pub fn animate_dumps(&mut self, dt: Scalar) -> EngineResult<EngineDump> {
        self.animate(dt)?;
        self.dumps()
    }

    /// Rebuild an engine from a structural dump. Ids, names, magnitudes,
    /// and kinematics survive to float precision; formulas are code and
    /// must be re-attached via [`Engine::assign_field`]
    pub fn loads(dump: &EngineDump, precision: Precision) -> EngineResult<Engine> {
        let mut engine = Engine::new(precision);

        for field in &dump.fields {
            engine.store.adopt_group(field.id.clone(), Priority::default());
            let restored = Field::new(field.id.clone(), &field.name, None, field.units.as_deref());
            engine
                .store
                .set_attribute(&field.id, GroupTag::Field(restored));
        }

        for ensemble in &dump.ensembles {
            engine.adopt_ensemble(ensemble)?;
        }

        for particle in &dump.particles {
            // a particle may reference an ensemble that was cleared from
            // the registry after the particle was added
            if engine.ensemble(&particle.ensemble.id).is_none() {
                engine.adopt_ensemble(&particle.ensemble)?;
            }
            engine.store.adopt_object(particle.id.clone());
            let position = Vector::from_f64s(&particle.position)?;
            let degrees = particle
                .kinematics
                .iter()
                .map(|degree| Vector::from_f64s(degree))
                .collect::<EngineResult<Vec<_>>>()?;
            let restored = Particle::new(
                particle.id.clone(),
                position,
                Kinematics::with_degrees(degrees),
                particle.ensemble.id.clone(),
            );
            let field_ids: Vec<GroupId> = particle
                .ensemble
                .forces
                .iter()
                .map(|force| force.id.clone())
                .collect();
            engine.store.set_properties(&particle.id, restored)?;
            engine.store.attach_group(&particle.id, &field_ids)?;
        }

        Ok(engine)
    }

    fn adopt_ensemble(&mut self, dump: &EnsembleDump) -> EngineResult<()> {
        let mut forces = Vec::with_capacity(dump.forces.len());
        for force in &dump.forces {
            let center = match &force.center {
                TensorDump::Scalar(scalar) => Tensor::Scalar(decimalize(*scalar)?),
                TensorDump::Vector(vector) => Tensor::Vector(Vector::from_f64s(vector)?),
            };
            forces.push(Force::new(
                force.id.clone(),
                decimalize(force.magnitude)?,
                center,
            ));
        }
        let restored = Ensemble::new(
            dump.id.clone(),
            &dump.name,
            forces,
            decimalize(dump.rest_energy)?,
            self.precision,
        )?;
        self.store.adopt_group(dump.id.clone(), Priority::default());
        self.store
            .set_attribute(&dump.id, GroupTag::Ensemble(restored));
        Ok(())
    }
}

/// Top-level wire shape: ordered lists of per-entity dumps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDump {
    pub particles: Vec<ParticleDump>,
    pub fields: Vec<FieldDump>,
    pub ensembles: Vec<EnsembleDump>,
}
