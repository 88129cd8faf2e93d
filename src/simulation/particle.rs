//! A single simulated particle.
//!
//! Holds its store-assigned id, a position, the kinematic degree stack,
//! and the id of the ensemble it belongs to. The ensemble itself lives in
//! the engine's registry; many particles reference one ensemble and the
//! ensemble outlives any of them, so the reference is an id resolved
//! through the engine rather than an owning pointer.

use serde::{Deserialize, Serialize};

use crate::simulation::ensemble::EnsembleDump;
use crate::simulation::kinematics::Kinematics;
use crate::simulation::vector::Vector;
use crate::store::store::{GroupId, ObjectId};

#[derive(Debug, Clone)]
pub struct Particle {
    id: ObjectId,
    pub position: Vector,
    pub kinematics: Kinematics,
    ensemble: GroupId,
}

impl Particle {
    pub fn new(id: ObjectId, position: Vector, kinematics: Kinematics, ensemble: GroupId) -> Self {
        Self {
            id,
            position,
            kinematics,
            ensemble,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Id of the ensemble this particle belongs to
    pub fn ensemble(&self) -> &GroupId {
        &self.ensemble
    }

    pub fn dumps(&self, ensemble: EnsembleDump) -> ParticleDump {
        ParticleDump {
            id: self.id.clone(),
            position: self.position.dumps(),
            kinematics: self.kinematics.dumps(),
            ensemble,
        }
    }
}

/// Wire shape of a particle, with its ensemble dump embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleDump {
    pub id: ObjectId,
    pub position: Vec<f64>,
    pub kinematics: Vec<Vec<f64>>,
    pub ensemble: EnsembleDump,
}
