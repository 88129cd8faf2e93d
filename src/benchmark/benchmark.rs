use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::formula::InverseSquare;
use crate::simulation::kinematics::Kinematics;
use crate::simulation::vector::{Precision, Scalar, Vector};
use std::sync::Arc;

/// Helper to build an engine with one inverse-square field and `n`
/// unit-magnitude particles on a deterministic grid
fn make_engine(n: usize, precision: Precision) -> Engine {
    let mut engine = Engine::new(precision);
    let field_id = engine.add_field("bench", Some(Arc::new(InverseSquare)), None);

    let field = engine.field(&field_id).expect("field just registered");
    let force = field.has(Scalar::from(1u32));
    let ensemble_id = engine
        .add_ensemble("unit", vec![force], Scalar::from(0u32))
        .expect("single force cannot fail to merge");

    for i in 0..n {
        // deterministic positions, no rand needed
        let x = (i % 16) as f64 * 2.0;
        let y = (i / 16) as f64 * 2.0;
        let position = Vector::from_f64s(&[x, y]).expect("finite literals");
        engine
            .add_particle(position, Kinematics::default(), &ensemble_id)
            .expect("unit magnitude is nonzero");
    }
    engine
}

/// Time one force-accumulation + integration tick at growing sizes.
/// Decimal arithmetic is the cost driver, so sizes stay small
pub fn bench_pairwise() {
    let ns = [4, 8, 16, 32, 64];
    let precision = Precision::default();

    for n in ns {
        let mut engine = make_engine(n, precision);

        // Warm up
        engine.animate(Scalar::from(1u32)).expect("tick");

        let t0 = Instant::now();
        engine.animate(Scalar::from(1u32)).expect("tick");
        let dt_tick = t0.elapsed().as_secs_f64();

        let pairs = n * (n - 1) / 2;
        println!("N = {n:4}, pairs = {pairs:5}, tick = {dt_tick:8.6} s");
    }
}

/// Time a multi-tick run at a couple of precisions, per-step average
pub fn bench_animate() {
    let steps = 5;
    let n = 16;

    println!("precision,step_ms");
    for digits in [10u64, 25, 50, 100] {
        let precision = Precision::new(digits);
        let mut engine = make_engine(n, precision);

        // Warm up
        engine.animate(Scalar::from(1u32)).expect("tick");

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.animate(Scalar::from(1u32)).expect("tick");
        }
        let per_step = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{digits},{per_step:.6}");
    }
}
