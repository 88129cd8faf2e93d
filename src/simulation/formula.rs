//! Built-in pairwise force laws.
//!
//! All three are inverse-square laws: the raw signed magnitude is
//! `m₁ · m₂ / |Δx|²` over the center-offset positions, mapped along the
//! separation direction. Gravity and the electrostatic law scale that by
//! their physical constants.

use bigdecimal::Zero;

use crate::error::EngineResult;
use crate::simulation::field::{FieldContext, Formula};
use crate::simulation::particle::Particle;
use crate::simulation::vector::{Precision, Scalar, Tensor, Vector};

/// `G`, in N·m²/kg²
pub fn gravitational_constant() -> Scalar {
    // 6.674e-11
    Scalar::from(6674u32) / Scalar::from(100_000_000_000_000u64)
}

/// `k_e`, in N·m²/C²
pub fn coulomb_constant() -> Scalar {
    // 8.988e9
    Scalar::from(8988u32) * Scalar::from(1_000_000u32)
}

/// Bare inverse-square law with unit coupling constant
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseSquare;

impl Formula for InverseSquare {
    fn evaluate(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector> {
        let (Some(force_a), Some(force_b)) = (context.force_a, context.force_b) else {
            // a particle without a force for this field feels nothing
            return Ok(Vector::new(vec![Scalar::from(0u32)]));
        };

        let position_a = particle_a.position.add(force_a.center());
        let position_b = particle_b.position.add(force_b.center());
        let delta_position = position_b.sub(&Tensor::Vector(position_a));

        let separation = delta_position.magnitude(precision)?;
        let divisor = &separation * &separation;
        let magnitude = if divisor.is_zero() {
            // coincident centers carry no direction to push along
            Scalar::from(0u32)
        } else {
            precision.div(&(force_a.magnitude() * force_b.magnitude()), &divisor)?
        };
        delta_position.magnitude_mapping(&magnitude, precision)
    }
}

/// Newtonian gravity: inverse square scaled by `G`
#[derive(Debug, Clone)]
pub struct Gravity {
    pub constant: Scalar,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            constant: gravitational_constant(),
        }
    }
}

impl Formula for Gravity {
    fn evaluate(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector> {
        let force_vector = InverseSquare.evaluate(particle_a, particle_b, context, precision)?;
        Ok(force_vector.mul(&Tensor::Scalar(self.constant.clone())))
    }
}

/// Coulomb electrostatics: inverse square scaled by `k_e`. Attraction and
/// repulsion fall out of the sign of the charge product
#[derive(Debug, Clone)]
pub struct Electrostatic {
    pub constant: Scalar,
}

impl Default for Electrostatic {
    fn default() -> Self {
        Self {
            constant: coulomb_constant(),
        }
    }
}

impl Formula for Electrostatic {
    fn evaluate(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector> {
        let force_vector = InverseSquare.evaluate(particle_a, particle_b, context, precision)?;
        Ok(force_vector.mul(&Tensor::Scalar(self.constant.clone())))
    }
}
