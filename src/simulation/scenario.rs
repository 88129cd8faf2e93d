//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - a fully registered [`Engine`] (fields, ensembles, particles)
//! - the tick size `dt` as an exact decimal
//! - the number of ticks to run
//!
//! Field and ensemble names in the config resolve to store-assigned group
//! ids here; the runtime never sees names again.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::configuration::config::{FormulaConfig, ScenarioConfig};
use crate::error::{EngineError, EngineResult};
use crate::simulation::engine::Engine;
use crate::simulation::field::Formula;
use crate::simulation::formula::{Electrostatic, Gravity, InverseSquare};
use crate::simulation::kinematics::Kinematics;
use crate::simulation::vector::{decimalize, Precision, Scalar, Tensor, Vector};
use crate::store::store::GroupId;

/// Runtime bundle constructed from a [`ScenarioConfig`]
pub struct Scenario {
    pub engine: Engine,
    pub dt: Scalar,
    pub steps: u32,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> EngineResult<Self> {
        let precision = Precision::new(cfg.parameters.precision);
        let mut engine = Engine::new(precision);

        // Fields: name -> group id, for the force declarations below
        let mut field_ids: IndexMap<String, GroupId> = IndexMap::new();
        for field_cfg in &cfg.fields {
            let formula: Option<Arc<dyn Formula>> = match field_cfg.formula {
                FormulaConfig::Gravity => Some(Arc::new(Gravity::default())),
                FormulaConfig::Electrostatic => Some(Arc::new(Electrostatic::default())),
                FormulaConfig::InverseSquare => Some(Arc::new(InverseSquare)),
                FormulaConfig::None => None,
            };
            let id = engine.add_field(&field_cfg.name, formula, field_cfg.units.as_deref());
            field_ids.insert(field_cfg.name.clone(), id);
        }

        // Ensembles: resolve each force's field name
        let mut ensemble_ids: IndexMap<String, GroupId> = IndexMap::new();
        for ensemble_cfg in &cfg.ensembles {
            let mut forces = Vec::with_capacity(ensemble_cfg.forces.len());
            for force_cfg in &ensemble_cfg.forces {
                let field_id = field_ids
                    .get(&force_cfg.field)
                    .ok_or_else(|| EngineError::UnknownName(force_cfg.field.clone()))?;
                let field = engine
                    .field(field_id)
                    .ok_or_else(|| EngineError::UnknownGroup(field_id.clone()))?;
                let magnitude = decimalize(force_cfg.magnitude)?;
                forces.push(match &force_cfg.center {
                    None => field.has(magnitude),
                    Some(center) => {
                        field.has_at(magnitude, Tensor::Vector(Vector::from_f64s(center)?))
                    }
                });
            }
            let rest_energy = decimalize(ensemble_cfg.rest_energy)?;
            let id = engine.add_ensemble(&ensemble_cfg.name, forces, rest_energy)?;
            ensemble_ids.insert(ensemble_cfg.name.clone(), id);
        }

        // Particles at t = 0
        for particle_cfg in &cfg.particles {
            let ensemble_id = ensemble_ids
                .get(&particle_cfg.ensemble)
                .ok_or_else(|| EngineError::UnknownName(particle_cfg.ensemble.clone()))?;
            let position = Vector::from_f64s(&particle_cfg.position)?;
            let kinematics = Kinematics::new(Vector::from_f64s(&particle_cfg.velocity)?);
            engine.add_particle(position, kinematics, ensemble_id)?;
        }

        info!(
            fields = cfg.fields.len(),
            ensembles = cfg.ensembles.len(),
            particles = cfg.particles.len(),
            "scenario built"
        );

        Ok(Self {
            engine,
            dt: decimalize(cfg.parameters.dt)?,
            steps: cfg.parameters.steps,
        })
    }

    /// Run the configured number of ticks
    pub fn run(&mut self) -> EngineResult<()> {
        for _ in 0..self.steps {
            self.engine.animate(self.dt.clone())?;
        }
        Ok(())
    }
}
