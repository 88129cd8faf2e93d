//! Preset engine with the subatomic particle species wired in.
//!
//! Registers gravity and electrostatic fields plus proton, neutron, and
//! electron ensembles, so callers can drop particles in without any
//! registration ceremony.

use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::simulation::engine::Engine;
use crate::simulation::formula::{Electrostatic, Gravity};
use crate::simulation::kinematics::Kinematics;
use crate::simulation::vector::{decimalize, Precision, Scalar, Vector};
use crate::store::store::{GroupId, ObjectId};

const PROTON_MASS: f64 = 1.673e-27;
const NEUTRON_MASS: f64 = 1.675e-27;
const ELECTRON_MASS: f64 = 9.11e-31;
const ELEMENTARY_CHARGE: f64 = 1.6e-19;

pub struct SubatomicEngine {
    engine: Engine,
    pub gravitational_field: GroupId,
    pub electrostatic_field: GroupId,
    pub proton_ensemble: GroupId,
    pub neutron_ensemble: GroupId,
    pub electron_ensemble: GroupId,
}

impl SubatomicEngine {
    pub fn new(precision: Precision) -> EngineResult<Self> {
        let mut engine = Engine::new(precision);
        let gravitational_field =
            engine.add_field("gravity", Some(Arc::new(Gravity::default())), Some("kg"));
        let electrostatic_field = engine.add_field(
            "electrostatic",
            Some(Arc::new(Electrostatic::default())),
            Some("C"),
        );

        let proton_ensemble = simple_ensemble(
            &mut engine,
            &gravitational_field,
            &electrostatic_field,
            "proton",
            decimalize(PROTON_MASS)?,
            decimalize(ELEMENTARY_CHARGE)?,
        )?;
        let neutron_ensemble = simple_ensemble(
            &mut engine,
            &gravitational_field,
            &electrostatic_field,
            "neutron",
            decimalize(NEUTRON_MASS)?,
            Scalar::from(0u32),
        )?;
        let electron_ensemble = simple_ensemble(
            &mut engine,
            &gravitational_field,
            &electrostatic_field,
            "electron",
            decimalize(ELECTRON_MASS)?,
            decimalize(-ELEMENTARY_CHARGE)?,
        )?;

        Ok(Self {
            engine,
            gravitational_field,
            electrostatic_field,
            proton_ensemble,
            neutron_ensemble,
            electron_ensemble,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Register a species from a mass and a charge. A chargeless species
    /// joins only the gravitational field
    pub fn add_simple_ensemble(
        &mut self,
        name: &str,
        mass: Scalar,
        charge: Scalar,
    ) -> EngineResult<GroupId> {
        simple_ensemble(
            &mut self.engine,
            &self.gravitational_field,
            &self.electrostatic_field,
            name,
            mass,
            charge,
        )
    }

    pub fn add_proton(&mut self, position: Vector) -> EngineResult<ObjectId> {
        let ensemble = self.proton_ensemble.clone();
        self.engine
            .add_particle(position, Kinematics::default(), &ensemble)
    }

    pub fn add_neutron(&mut self, position: Vector) -> EngineResult<ObjectId> {
        let ensemble = self.neutron_ensemble.clone();
        self.engine
            .add_particle(position, Kinematics::default(), &ensemble)
    }

    pub fn add_electron(&mut self, position: Vector) -> EngineResult<ObjectId> {
        let ensemble = self.electron_ensemble.clone();
        self.engine
            .add_particle(position, Kinematics::default(), &ensemble)
    }
}

fn simple_ensemble(
    engine: &mut Engine,
    gravitational_field: &GroupId,
    electrostatic_field: &GroupId,
    name: &str,
    mass: Scalar,
    charge: Scalar,
) -> EngineResult<GroupId> {
    use bigdecimal::Zero;
    if mass.is_zero() {
        return Err(EngineError::ZeroMass);
    }
    let gravity = engine
        .field(gravitational_field)
        .ok_or_else(|| EngineError::UnknownGroup(gravitational_field.clone()))?;
    let mut forces = vec![gravity.has(mass)];
    if !charge.is_zero() {
        let electrostatic = engine
            .field(electrostatic_field)
            .ok_or_else(|| EngineError::UnknownGroup(electrostatic_field.clone()))?;
        forces.push(electrostatic.has(charge));
    }
    engine.add_ensemble(name, forces, Scalar::from(0u32))
}
