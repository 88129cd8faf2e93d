//! A field-scoped (magnitude, center) pair.
//!
//! Forces combine only with forces of the same field: magnitudes are
//! summed and centers recombined as the magnitude-weighted mean
//! `(Σ magnitude·center) / (Σ magnitude)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::simulation::vector::{Precision, Scalar, Tensor};
use crate::store::store::GroupId;

#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    field: GroupId,
    magnitude: Scalar,
    center: Tensor,
}

impl Force {
    pub fn new(field: GroupId, magnitude: Scalar, center: Tensor) -> Self {
        Self {
            field,
            magnitude,
            center,
        }
    }

    /// Id of the field this force is scoped to
    pub fn field(&self) -> &GroupId {
        &self.field
    }

    pub fn magnitude(&self) -> &Scalar {
        &self.magnitude
    }

    pub fn center(&self) -> &Tensor {
        &self.center
    }

    /// `magnitude × center`, the weighted contribution used when
    /// recombining centers
    pub fn collapse(&self) -> Tensor {
        self.center.scale(&self.magnitude)
    }

    /// Combine with another force of the same field: magnitudes add,
    /// centers take the magnitude-weighted mean. A different field id is a
    /// logic error and never silently resolved
    pub fn combine(&self, other: &Force, precision: Precision) -> EngineResult<Force> {
        if self.field != other.field {
            return Err(EngineError::FieldMismatch {
                left: self.field.clone(),
                right: other.field.clone(),
            });
        }
        let magnitude = &self.magnitude + &other.magnitude;
        let center = self
            .collapse()
            .add(&other.collapse())
            .div_scalar(&magnitude, precision)?;
        Ok(Force::new(self.field.clone(), magnitude, center))
    }

    /// In-place variant of [`Force::combine`]
    pub fn combine_assign(&mut self, other: &Force, precision: Precision) -> EngineResult<()> {
        *self = self.combine(other, precision)?;
        Ok(())
    }

    /// Fold a non-empty list of same-field forces
    pub fn solve(forces: &[Force], precision: Precision) -> EngineResult<Force> {
        let (first, rest) = forces.split_first().ok_or(EngineError::EmptySolve)?;
        let mut accumulated = first.clone();
        for force in rest {
            accumulated.combine_assign(force, precision)?;
        }
        Ok(accumulated)
    }

    pub fn dumps(&self) -> ForceDump {
        use bigdecimal::ToPrimitive;
        ForceDump {
            id: self.field.clone(),
            magnitude: self.magnitude.to_f64().unwrap_or(f64::NAN),
            center: match &self.center {
                Tensor::Scalar(scalar) => TensorDump::Scalar(scalar.to_f64().unwrap_or(f64::NAN)),
                Tensor::Vector(vector) => TensorDump::Vector(vector.dumps()),
            },
        }
    }
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.magnitude, self.field)
    }
}

/// Wire shape of a force: scalars as lossy floats, the center keeping its
/// scalar-or-vector shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForceDump {
    pub id: GroupId,
    pub magnitude: f64,
    pub center: TensorDump,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TensorDump {
    Scalar(f64),
    Vector(Vec<f64>),
}
