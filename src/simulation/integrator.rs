//! Taylor-series advance for one particle over one tick.
//!
//! Position sums `dᵢ · tⁱ / i!` with the position itself at i = 0 and the
//! stored degrees shifted up by one (velocity at i = 1, acceleration at
//! i = 2, …). Velocity is the analogous sum one order down, starting from
//! itself at i = 0. Acceleration does not persist between ticks: degree 2
//! resets to the zero vector after the advance.

use crate::error::EngineResult;
use crate::simulation::kinematics::Kinematics;
use crate::simulation::particle::Particle;
use crate::simulation::vector::{Precision, Scalar, Vector};

/// Advance `particle` by elapsed time `dt`, updating position and
/// velocity in place and clearing acceleration
pub fn taylor_advance(
    particle: &mut Particle,
    dt: &Scalar,
    precision: Precision,
) -> EngineResult<()> {
    let degrees = particle.kinematics.degrees().to_vec();

    // Position: the i = 0 term is the position itself (t⁰ / 0! = 1),
    // each stored degree d contributes d · tⁱ / i! one order up
    let mut position_terms = Vec::with_capacity(degrees.len() + 1);
    position_terms.push(Kinematics::series_term(&particle.position, 0, dt, precision));
    for (offset, degree) in degrees.iter().enumerate() {
        position_terms.push(Kinematics::series_term(
            degree,
            offset as u32 + 1,
            dt,
            precision,
        ));
    }
    particle.position = Vector::solve(&position_terms)?;

    // Velocity: same series one order down, velocity itself at i = 0
    let velocity_terms: Vec<Vector> = degrees
        .iter()
        .enumerate()
        .map(|(offset, degree)| Kinematics::series_term(degree, offset as u32, dt, precision))
        .collect();
    let velocity = Vector::solve(&velocity_terms)?;
    particle.kinematics.set_motion(velocity, 1)?;

    // Accelerations are re-accumulated from scratch next tick
    particle.kinematics.set_motion(Vector::empty(), 2)?;
    Ok(())
}
