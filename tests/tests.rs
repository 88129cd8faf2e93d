use std::cmp::Ordering;
use std::sync::Arc;

use bigdecimal::{ToPrimitive, Zero};

use taysim::{
    decimalize, Engine, EngineError, EngineResult, Entry, FieldContext, Force, Formula,
    GroupId, InverseSquare, Kinematics, Ludus, Particle, Precision, Priority, Scalar,
    SubatomicEngine, Tensor, Vector,
};

/// Build a vector from float literals
pub fn vector(values: &[f64]) -> Vector {
    Vector::from_f64s(values).unwrap()
}

/// Exact decimal from a float literal
pub fn scalar(value: f64) -> Scalar {
    decimalize(value).unwrap()
}

pub fn precision() -> Precision {
    Precision::default()
}

/// Pairwise law returning a unit-magnitude attractive vector along the
/// line from the first particle to the second
pub struct UnitAttractor;

impl Formula for UnitAttractor {
    fn evaluate(
        &self,
        particle_a: &Particle,
        particle_b: &Particle,
        _context: &FieldContext<'_>,
        precision: Precision,
    ) -> EngineResult<Vector> {
        let delta = particle_b
            .position
            .sub(&Tensor::Vector(particle_a.position.clone()));
        delta.magnitude_mapping(&Scalar::from(1u32), precision)
    }
}

/// Engine with one unit-attractor field and one unit-magnitude ensemble
pub fn unit_engine() -> (Engine, GroupId, GroupId) {
    let mut engine = Engine::new(precision());
    let field_id = engine.add_field("pull", Some(Arc::new(UnitAttractor)), None);
    let force = engine.field(&field_id).unwrap().has(Scalar::from(1u32));
    let ensemble_id = engine
        .add_ensemble("unit", vec![force], Scalar::zero())
        .unwrap();
    (engine, field_id, ensemble_id)
}

// ==================================================================================
// Vector algebra tests
// ==================================================================================

#[test]
fn addition_zero_pads_the_shorter_operand() {
    let left = vector(&[1.0, 2.0, 3.0]);
    let right = vector(&[10.0, 20.0]);

    let sum = left.add(&Tensor::Vector(right));

    assert_eq!(sum.dimensionality(), 3);
    assert_eq!(sum, vector(&[11.0, 22.0, 3.0]));
}

#[test]
fn scalar_operands_broadcast() {
    let base = vector(&[1.0, 2.0]);

    assert_eq!(base.add(&Tensor::Scalar(scalar(5.0))), vector(&[6.0, 7.0]));
    assert_eq!(base.mul(&Tensor::Scalar(scalar(2.0))), vector(&[2.0, 4.0]));
    assert_eq!(base.sub(&Tensor::Scalar(scalar(1.0))), vector(&[0.0, 1.0]));
}

#[test]
fn in_place_variants_match_their_pure_counterparts() {
    let mut vec_a = vector(&[1.0, 2.0]);
    vec_a.add_assign(&Tensor::Scalar(scalar(1.0)));
    assert_eq!(vec_a, vector(&[2.0, 3.0]));

    vec_a.mul_assign(&Tensor::Vector(vector(&[3.0, 3.0])));
    assert_eq!(vec_a, vector(&[6.0, 9.0]));

    vec_a.negate();
    assert_eq!(vec_a, vector(&[-6.0, -9.0]));
}

#[test]
fn division_by_a_zero_component_fails() {
    let numerator = vector(&[1.0, 1.0]);

    let by_scalar = numerator.div(&Tensor::Scalar(Scalar::zero()), precision());
    assert!(matches!(by_scalar, Err(EngineError::ZeroDivision)));

    // the shorter divisor zero-pads, which is also a zero division
    let by_padded = numerator.div(&Tensor::Vector(vector(&[2.0])), precision());
    assert!(matches!(by_padded, Err(EngineError::ZeroDivision)));
}

#[test]
fn division_rounds_to_the_given_precision() {
    let numerator = vector(&[1.0]);
    let third = numerator
        .div(&Tensor::Scalar(scalar(3.0)), Precision::new(5))
        .unwrap();

    assert_eq!(third.component(0), scalar(0.33333));
}

#[test]
fn integer_powers_apply_elementwise() {
    let base = vector(&[2.0, 4.0]);

    assert_eq!(base.powi(3, precision()).unwrap(), vector(&[8.0, 64.0]));
    assert_eq!(base.powi(0, precision()).unwrap(), vector(&[1.0, 1.0]));
    assert_eq!(base.powi(-1, precision()).unwrap(), vector(&[0.5, 0.25]));
}

#[test]
fn negative_power_of_zero_fails() {
    let zero = vector(&[0.0]);
    assert!(matches!(
        zero.powi(-2, precision()),
        Err(EngineError::ZeroDivision)
    ));
}

#[test]
fn comparison_is_elementwise_with_padding() {
    let left = vector(&[1.0, 5.0]);

    assert_eq!(
        left.cmp_elementwise(&Tensor::Scalar(scalar(3.0))),
        vec![Ordering::Less, Ordering::Greater]
    );
    assert_eq!(
        vector(&[1.0]).cmp_elementwise(&Tensor::Vector(vector(&[1.0, 2.0]))),
        vec![Ordering::Equal, Ordering::Less]
    );
}

#[test]
fn magnitude_is_the_euclidean_norm() {
    let v = vector(&[3.0, 4.0]);
    assert_eq!(v.magnitude(precision()).unwrap(), scalar(5.0));
}

#[test]
fn magnitude_mapping_rescales_to_the_target() {
    let v = vector(&[3.0, 4.0]);
    let mapped = v.magnitude_mapping(&scalar(10.0), precision()).unwrap();

    assert_eq!(mapped, vector(&[6.0, 8.0]));
    assert_eq!(mapped.magnitude(precision()).unwrap(), scalar(10.0));
}

#[test]
fn magnitude_mapping_of_the_zero_vector_is_zero() {
    let zero = vector(&[0.0, 0.0]);
    let mapped = zero.magnitude_mapping(&scalar(7.0), precision()).unwrap();

    assert_eq!(mapped, vector(&[0.0, 0.0]));
}

#[test]
fn solve_folds_by_elementwise_addition() {
    let folded = Vector::solve(&[vector(&[1.0]), vector(&[2.0, 2.0])]).unwrap();
    assert_eq!(folded, vector(&[3.0, 2.0]));
}

#[test]
fn solve_of_an_empty_list_fails() {
    assert!(matches!(Vector::solve(&[]), Err(EngineError::EmptySolve)));
}

#[test]
fn decimalize_keeps_float_literals_exact() {
    // 0.1 must be the decimal 0.1, not the nearest binary fraction
    let tenth = scalar(0.1);
    assert_eq!(tenth * Scalar::from(10u32), Scalar::from(1u32));

    assert!(matches!(
        decimalize(f64::NAN),
        Err(EngineError::NonFiniteScalar(_))
    ));
}

// ==================================================================================
// Kinematics tests
// ==================================================================================

#[test]
fn add_motion_on_a_fresh_stack_reads_back() {
    let mut kinematics = Kinematics::default();
    kinematics.add_motion(vector(&[1.0, 2.0]), 2).unwrap();

    assert_eq!(kinematics.motion(2).unwrap(), vector(&[1.0, 2.0]));
}

#[test]
fn set_motion_auto_pads_intermediate_degrees() {
    let mut kinematics = Kinematics::default();
    kinematics.set_motion(vector(&[1.0]), 4).unwrap();

    assert_eq!(kinematics.depth(), 4);
    assert_eq!(kinematics.motion(2).unwrap(), Vector::empty());
    assert_eq!(kinematics.motion(3).unwrap(), Vector::empty());
    assert_eq!(kinematics.motion(4).unwrap(), vector(&[1.0]));
}

#[test]
fn degree_zero_is_rejected() {
    let mut kinematics = Kinematics::default();
    assert!(matches!(
        kinematics.set_motion(Vector::empty(), 0),
        Err(EngineError::DegreeOutOfRange(0))
    ));
    assert!(matches!(
        kinematics.motion(0),
        Err(EngineError::DegreeOutOfRange(0))
    ));
}

#[test]
fn add_motion_accumulates() {
    let mut kinematics = Kinematics::default();
    kinematics.add_motion(vector(&[1.0]), 2).unwrap();
    kinematics.add_motion(vector(&[0.5, 1.0]), 2).unwrap();

    assert_eq!(kinematics.motion(2).unwrap(), vector(&[1.5, 1.0]));
}

#[test]
fn series_term_is_d_t_i_over_i_factorial() {
    // d · t² / 2! with d = (2), t = 3 is (9)
    let term = Kinematics::series_term(&vector(&[2.0]), 2, &scalar(3.0), precision());
    assert_eq!(term, vector(&[9.0]));
}

// ==================================================================================
// Force and ensemble tests
// ==================================================================================

#[test]
fn combination_sums_magnitudes_and_weights_centers() {
    let field = field_id_for_tests();
    let left = Force::new(field.clone(), scalar(1.0), Tensor::Scalar(scalar(0.0)));
    let right = Force::new(field, scalar(3.0), Tensor::Scalar(scalar(2.0)));

    let combined = left.combine(&right, precision()).unwrap();

    assert_eq!(combined.magnitude(), &scalar(4.0));
    assert_eq!(combined.center(), &Tensor::Scalar(scalar(1.5)));
}

#[test]
fn combination_across_fields_fails() {
    let left = Force::new(field_id_for_tests(), scalar(1.0), Tensor::Scalar(scalar(0.5)));
    let right = Force::new(field_id_for_tests(), scalar(1.0), Tensor::Scalar(scalar(0.5)));

    assert!(matches!(
        left.combine(&right, precision()),
        Err(EngineError::FieldMismatch { .. })
    ));
}

#[test]
fn combination_mixes_scalar_and_vector_centers() {
    let field = field_id_for_tests();
    let left = Force::new(field.clone(), scalar(2.0), Tensor::Scalar(scalar(0.5)));
    let right = Force::new(field, scalar(2.0), Tensor::Vector(vector(&[1.0, 1.0])));

    let combined = left.combine(&right, precision()).unwrap();

    assert_eq!(combined.center(), &Tensor::Vector(vector(&[0.75, 0.75])));
}

#[test]
fn cancelling_magnitudes_cannot_recombine_centers() {
    let field = field_id_for_tests();
    let left = Force::new(field.clone(), scalar(1.0), Tensor::Scalar(scalar(0.0)));
    let right = Force::new(field, scalar(-1.0), Tensor::Scalar(scalar(1.0)));

    assert!(matches!(
        left.combine(&right, precision()),
        Err(EngineError::ZeroDivision)
    ));
}

#[test]
fn force_solve_of_an_empty_list_fails() {
    assert!(matches!(
        Force::solve(&[], precision()),
        Err(EngineError::EmptySolve)
    ));
}

#[test]
fn ensemble_construction_merges_to_one_force_per_field() {
    let mut engine = Engine::new(precision());
    let field_a = engine.add_field("a", None, None);
    let field_b = engine.add_field("b", None, None);

    let forces = vec![
        engine.field(&field_a).unwrap().has(scalar(1.0)),
        engine.field(&field_b).unwrap().has(scalar(5.0)),
        engine.field(&field_a).unwrap().has(scalar(2.0)),
    ];
    let ensemble_id = engine.add_ensemble("mixed", forces, Scalar::zero()).unwrap();
    let ensemble = engine.ensemble(&ensemble_id).unwrap();

    // three inputs over two distinct fields merge down to two forces
    assert_eq!(ensemble.forces().len(), 2);
    assert_eq!(ensemble.force_for(&field_a).unwrap().magnitude(), &scalar(3.0));
    assert_eq!(ensemble.force_for(&field_b).unwrap().magnitude(), &scalar(5.0));
}

/// Forces need a real group id; mint one from a throwaway engine
fn field_id_for_tests() -> GroupId {
    let mut engine = Engine::new(precision());
    engine.add_field("scratch", None, None)
}

// ==================================================================================
// Store tests
// ==================================================================================

#[test]
fn membership_is_bidirectional() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    let group = store.new_group();

    store.attach_group(&object, &[group.clone()]).unwrap();

    assert_eq!(store.groups_of(&object).unwrap(), &[group.clone()]);
    assert_eq!(store.members(&group).unwrap(), &[object.clone()]);

    store.detach_group(&object, &[group.clone()]).unwrap();

    assert!(store.groups_of(&object).unwrap().is_empty());
    assert!(store.members(&group).is_none());
}

#[test]
fn reattaching_is_a_no_op() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    let group = store.new_group();

    store.attach_group(&object, &[group.clone()]).unwrap();
    store.attach_group(&object, &[group.clone()]).unwrap();

    assert_eq!(store.members(&group).unwrap().len(), 1);
    assert_eq!(store.groups_of(&object).unwrap().len(), 1);
}

#[test]
fn detaching_the_last_member_deletes_the_group_and_its_attributes() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    let group = store.new_group();
    store.set_attribute(&group, "label".to_owned());

    store.attach_group(&object, &[group.clone()]).unwrap();
    store.detach_group(&object, &[group.clone()]).unwrap();

    assert!(!store.contains_group(&group));
    assert!(store.attribute(&group).is_none());
}

#[test]
fn removing_an_object_detaches_it_everywhere() {
    let mut store: Ludus<String, String> = Ludus::new();
    let survivor = store.new_object();
    let doomed = store.new_object();
    let shared = store.new_group();
    let exclusive = store.new_group();

    store
        .attach_group(&survivor, &[shared.clone()])
        .and_then(|_| store.attach_group(&doomed, &[shared.clone(), exclusive.clone()]))
        .unwrap();

    store.remove_object(&doomed).unwrap();

    assert!(!store.contains_object(&doomed));
    // the shared group keeps its other member, the exclusive one dies
    assert_eq!(store.members(&shared).unwrap(), &[survivor]);
    assert!(!store.contains_group(&exclusive));
}

#[test]
fn removal_of_unknown_ids_fails_but_queries_do_not() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    store.remove_object(&object).unwrap();

    assert!(matches!(
        store.remove_object(&object),
        Err(EngineError::UnknownObject(_))
    ));
    assert!(store.properties(&object).is_none());
    assert!(store.get(object.as_str()).is_none());
}

#[test]
fn detaching_a_group_never_attached_fails() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    let group = store.new_group();

    assert!(matches!(
        store.detach_group(&object, &[group]),
        Err(EngineError::NotAMember { .. })
    ));
}

#[test]
fn get_classifies_ids_by_prefix() {
    let mut store: Ludus<String, String> = Ludus::new();
    let object = store.new_object();
    store.set_properties(&object, "payload".to_owned()).unwrap();
    let group = store.new_group();
    store.attach_group(&object, &[group.clone()]).unwrap();

    assert!(matches!(
        store.get(object.as_str()),
        Some(Entry::Object { properties: Some(_), .. })
    ));
    assert!(matches!(store.get(group.as_str()), Some(Entry::Group { .. })));
    assert!(store.get("not-an-id").is_none());
}

#[test]
fn by_priority_orders_objects_by_their_highest_group_level() {
    let mut store: Ludus<String, String> = Ludus::new();

    let top = store.new_object();
    let highest = store.new_group(); // defaults to Priority::Highest
    store.attach_group(&top, &[highest.clone()]).unwrap();

    let middle = store.new_object();
    let level = store.new_group_with_priority(Priority::Level(3));
    store.attach_group(&middle, &[level.clone()]).unwrap();

    let bottom = store.new_object(); // no groups sorts lowest

    let ordered: Vec<_> = store.by_priority().into_iter().map(|(id, _)| id.clone()).collect();
    assert_eq!(ordered, vec![bottom, middle, top]);
}

// ==================================================================================
// Engine integration tests
// ==================================================================================

#[test]
fn two_particles_attract_symmetrically() {
    let (mut engine, _field, ensemble) = unit_engine();
    let left = engine
        .add_particle(vector(&[0.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();
    let right = engine
        .add_particle(vector(&[2.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();

    engine.animate(scalar(1.0)).unwrap();

    // unit force over unit magnitude: acceleration (±1, 0), so the
    // Taylor position term is ±t²/2 and the velocity term ±t
    let left_particle = engine.particle(&left).unwrap();
    assert_eq!(left_particle.position, vector(&[0.5, 0.0]));
    assert_eq!(left_particle.kinematics.motion(1).unwrap(), vector(&[1.0, 0.0]));

    let right_particle = engine.particle(&right).unwrap();
    assert_eq!(right_particle.position, vector(&[1.5, 0.0]));
    assert_eq!(right_particle.kinematics.motion(1).unwrap(), vector(&[-1.0, 0.0]));

    // accelerations do not persist between ticks
    assert_eq!(left_particle.kinematics.motion(2).unwrap(), Vector::empty());
    assert_eq!(engine.time(), &scalar(1.0));
}

#[test]
fn velocity_keeps_accumulating_across_ticks() {
    let (mut engine, _field, ensemble) = unit_engine();
    engine
        .add_particle(vector(&[0.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();
    let watched = engine
        .add_particle(vector(&[10.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();

    engine.animate(scalar(1.0)).unwrap();
    let after_one = engine.particle(&watched).unwrap().kinematics.motion(1).unwrap();

    engine.animate(scalar(1.0)).unwrap();
    let after_two = engine.particle(&watched).unwrap().kinematics.motion(1).unwrap();

    // same unit pull both ticks, so speed along x doubles
    assert_eq!(after_one, vector(&[-1.0, 0.0]));
    assert_eq!(after_two, vector(&[-2.0, 0.0]));
}

#[test]
fn zero_magnitude_ensembles_are_rejected_at_attachment() {
    let mut engine = Engine::new(precision());
    let field_id = engine.add_field("dead", None, None);
    let force = engine.field(&field_id).unwrap().has(Scalar::zero());
    let ensemble_id = engine.add_ensemble("ghost", vec![force], Scalar::zero()).unwrap();

    let result = engine.add_particle(vector(&[0.0]), Kinematics::default(), &ensemble_id);
    assert!(matches!(result, Err(EngineError::ZeroMagnitude { .. })));
}

#[test]
fn removing_particles_cleans_up_emptied_field_groups() {
    let (mut engine, field, ensemble) = unit_engine();
    let first = engine
        .add_particle(vector(&[0.0]), Kinematics::default(), &ensemble)
        .unwrap();
    let second = engine
        .add_particle(vector(&[1.0]), Kinematics::default(), &ensemble)
        .unwrap();

    engine.remove_particle(&first).unwrap();
    assert_eq!(engine.store().members(&field).unwrap(), &[second.clone()]);

    // last member out: the group and its field attribute disappear
    engine.remove_particle(&second).unwrap();
    assert!(engine.store().members(&field).is_none());
    assert!(engine.field(&field).is_none());
}

#[test]
fn fields_without_formulas_contribute_nothing() {
    let mut engine = Engine::new(precision());
    let field_id = engine.add_field("pending", None, None);
    let force = engine.field(&field_id).unwrap().has(scalar(2.0));
    let ensemble_id = engine.add_ensemble("inert", vec![force], Scalar::zero()).unwrap();

    let id = engine
        .add_particle(vector(&[4.0, 2.0]), Kinematics::default(), &ensemble_id)
        .unwrap();
    engine
        .add_particle(vector(&[0.0, 0.0]), Kinematics::default(), &ensemble_id)
        .unwrap();

    engine.animate(scalar(1.0)).unwrap();

    assert_eq!(engine.particle(&id).unwrap().position, vector(&[4.0, 2.0]));
}

#[test]
fn inverse_square_is_antisymmetric_under_argument_swap() {
    let mut engine = Engine::new(precision());
    let field_id = engine.add_field("pull", Some(Arc::new(InverseSquare)), None);
    let force = engine.field(&field_id).unwrap().has(scalar(2.0));
    let ensemble_id = engine.add_ensemble("pair", vec![force], Scalar::zero()).unwrap();

    let first = engine
        .add_particle(vector(&[0.0, 0.0]), Kinematics::default(), &ensemble_id)
        .unwrap();
    let second = engine
        .add_particle(vector(&[3.0, 0.0]), Kinematics::default(), &ensemble_id)
        .unwrap();

    let field = engine.field(&field_id).unwrap();
    let ensemble = engine.ensemble(&ensemble_id).unwrap();
    let shared_force = ensemble.force_for(&field_id).unwrap();
    let particle_a = engine.particle(&first).unwrap();
    let particle_b = engine.particle(&second).unwrap();
    let context = FieldContext {
        field,
        force_a: Some(shared_force),
        force_b: Some(shared_force),
    };

    let forward = InverseSquare
        .evaluate(particle_a, particle_b, &context, precision())
        .unwrap();
    let backward = InverseSquare
        .evaluate(particle_b, particle_a, &context, precision())
        .unwrap();

    assert_eq!(forward, backward.neg());
    assert!(forward.magnitude(precision()).unwrap() > Scalar::zero());
}

// ==================================================================================
// Dump / reload tests
// ==================================================================================

#[test]
fn dump_round_trips_through_json() {
    let mut subatomic = SubatomicEngine::new(precision()).unwrap();
    subatomic.add_proton(vector(&[0.0, 3.0])).unwrap();
    subatomic.add_electron(vector(&[3.0, 3.0])).unwrap();

    let dump = subatomic.engine().dumps().unwrap();
    let json = serde_json::to_string(&dump).unwrap();
    let parsed: taysim::EngineDump = serde_json::from_str(&json).unwrap();

    let loaded = Engine::loads(&parsed, precision()).unwrap();

    // ids survive in order
    let original_ids: Vec<_> = subatomic.engine().particles().map(|p| p.id().clone()).collect();
    let loaded_ids: Vec<_> = loaded.particles().map(|p| p.id().clone()).collect();
    assert_eq!(original_ids, loaded_ids);

    // ensemble names and force magnitudes survive to float precision
    for particle in loaded.particles() {
        let ensemble = loaded.ensemble(particle.ensemble()).unwrap();
        let original = subatomic.engine().ensemble(particle.ensemble()).unwrap();
        assert_eq!(ensemble.name(), original.name());
        for (restored, kept) in ensemble.forces().iter().zip(original.forces()) {
            let restored_magnitude = restored.magnitude().to_f64().unwrap();
            let kept_magnitude = kept.magnitude().to_f64().unwrap();
            assert!((restored_magnitude - kept_magnitude).abs() <= kept_magnitude.abs() * 1e-12);
        }
    }

    // every registered species is in the top-level list, member or not
    assert_eq!(loaded.ensembles().count(), 3);
    assert_eq!(loaded.fields().count(), 2);
}

#[test]
fn animate_dumps_advances_then_reports() {
    let (mut engine, _field, ensemble) = unit_engine();
    engine
        .add_particle(vector(&[0.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();
    engine
        .add_particle(vector(&[2.0, 0.0]), Kinematics::default(), &ensemble)
        .unwrap();

    let dump = engine.animate_dumps(scalar(1.0)).unwrap();

    assert_eq!(engine.time(), &scalar(1.0));
    assert_eq!(dump.particles.len(), 2);
    assert_eq!(dump.particles[0].position, vec![0.5, 0.0]);
}

// ==================================================================================
// Subatomic preset tests
// ==================================================================================

#[test]
fn neutron_carries_only_the_gravitational_force() {
    let subatomic = SubatomicEngine::new(precision()).unwrap();
    let neutron = subatomic
        .engine()
        .ensemble(&subatomic.neutron_ensemble)
        .unwrap();

    assert_eq!(neutron.forces().len(), 1);
    assert_eq!(neutron.forces()[0].field(), &subatomic.gravitational_field);
}

#[test]
fn zero_mass_species_are_rejected() {
    let mut subatomic = SubatomicEngine::new(precision()).unwrap();
    let result = subatomic.add_simple_ensemble("phantom", Scalar::zero(), scalar(1.0));
    assert!(matches!(result, Err(EngineError::ZeroMass)));
}

#[test]
fn electrons_repel_symmetrically() {
    let mut subatomic = SubatomicEngine::new(precision()).unwrap();
    let first = subatomic.add_electron(vector(&[0.0, 0.0])).unwrap();
    let second = subatomic.add_electron(vector(&[3.0, 0.0])).unwrap();

    subatomic.engine_mut().animate(scalar(1.0)).unwrap();

    let first_x = subatomic.engine().particle(&first).unwrap().position.component(0);
    let second_x = subatomic
        .engine()
        .particle(&second)
        .unwrap()
        .position
        .component(0);

    assert!(first_x < Scalar::zero(), "first electron did not recoil");
    assert!(second_x > scalar(3.0), "second electron did not recoil");
    // equal species feel exactly opposite accelerations
    assert_eq!(&first_x + &second_x, scalar(3.0));
}
