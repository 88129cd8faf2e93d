pub mod simulation;
pub mod configuration;
pub mod store;
pub mod benchmark;
pub mod error;

pub use simulation::vector::{decimalize, Precision, Scalar, Tensor, Vector};
pub use simulation::kinematics::Kinematics;
pub use simulation::force::{Force, ForceDump, TensorDump};
pub use simulation::field::{Field, FieldContext, FieldDump, Formula};
pub use simulation::ensemble::{Ensemble, EnsembleDump};
pub use simulation::particle::{Particle, ParticleDump};
pub use simulation::engine::{Engine, EngineDump, GroupTag};
pub use simulation::integrator::taylor_advance;
pub use simulation::formula::{Electrostatic, Gravity, InverseSquare};
pub use simulation::subatomic::SubatomicEngine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    EnsembleConfig, FieldConfig, ForceConfig, FormulaConfig, ParametersConfig, ParticleConfig,
    ScenarioConfig,
};

pub use store::store::{Entry, GroupId, Ludus, ObjectId, Priority};

pub use error::{EngineError, EngineResult};

pub use benchmark::benchmark::{bench_animate, bench_pairwise};
