//! Motion-degree stack for one particle.
//!
//! Degree 1 is velocity, degree 2 acceleration, degree 3 jerk, and so on;
//! the API is 1-based while storage is 0-based. Writing at a degree deeper
//! than the current stack auto-extends it with zero vectors, so any degree
//! can be addressed without prior setup.

use crate::error::{EngineError, EngineResult};
use crate::simulation::vector::{scalar_powi, Precision, Scalar, Tensor, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    degrees: Vec<Vector>,
}

impl Kinematics {
    /// Start from a velocity; higher degrees grow on demand
    pub fn new(velocity: Vector) -> Self {
        Self {
            degrees: vec![velocity],
        }
    }

    /// Start from an explicit degree stack. Velocity is always present:
    /// an empty list gets a zero velocity
    pub fn with_degrees(degrees: Vec<Vector>) -> Self {
        if degrees.is_empty() {
            return Self::default();
        }
        Self { degrees }
    }

    pub fn velocity(&self) -> &Vector {
        // constructors guarantee at least one degree
        &self.degrees[0]
    }

    pub fn depth(&self) -> usize {
        self.degrees.len()
    }

    pub fn degrees(&self) -> &[Vector] {
        &self.degrees
    }

    /// Grow the stack with zero vectors so `degree` is addressable
    fn check(&mut self, degree: usize) -> EngineResult<()> {
        if degree < 1 {
            return Err(EngineError::DegreeOutOfRange(degree));
        }
        while self.degrees.len() < degree {
            self.degrees.push(Vector::empty());
        }
        Ok(())
    }

    /// Overwrite the motion vector at a 1-based degree
    pub fn set_motion(&mut self, vector: Vector, degree: usize) -> EngineResult<()> {
        self.check(degree)?;
        self.degrees[degree - 1] = vector;
        Ok(())
    }

    /// Accumulate into the motion vector at a 1-based degree
    pub fn add_motion(&mut self, vector: Vector, degree: usize) -> EngineResult<()> {
        self.check(degree)?;
        let motion = Vector::solve(&[self.degrees[degree - 1].clone(), vector])?;
        self.degrees[degree - 1] = motion;
        Ok(())
    }

    /// Read the motion vector at a 1-based degree; degrees beyond the
    /// current depth read as the zero vector
    pub fn motion(&self, degree: usize) -> EngineResult<Vector> {
        if degree < 1 {
            return Err(EngineError::DegreeOutOfRange(degree));
        }
        Ok(self.degrees.get(degree - 1).cloned().unwrap_or_default())
    }

    /// One Taylor-series term: `d · tⁱ / i!` for a degree-`i` quantity `d`
    /// after elapsed time `t`
    pub fn series_term(quantity: &Vector, i: u32, t: &Scalar, precision: Precision) -> Vector {
        let coefficient = scalar_powi(t, i) * precision.inv_factorial(i);
        quantity.mul(&Tensor::Scalar(coefficient))
    }

    /// Per-degree component lists as lossy floats for the structural dump
    pub fn dumps(&self) -> Vec<Vec<f64>> {
        self.degrees.iter().map(Vector::dumps).collect()
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(Vector::empty())
    }
}
