//! Property tests for the coordinator.
//!
//! Random sequences of entity and component operations are applied to a
//! small world alongside a plain `HashMap` model. After every step the
//! packed arrays, signatures, and system sets must agree with the model.

use std::collections::{HashMap, HashSet};

use engine_ecs::{Component, Coordinator, EcsError, Entity, Signature, System, WorldConfig};
use proptest::prelude::*;

const CAPACITY: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Mass(u32);

impl Component for Mass {
    fn type_name() -> &'static str {
        "Mass"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Charge(i32);

impl Component for Charge {
    fn type_name() -> &'static str {
        "Charge"
    }
}

struct Electrodynamics;

impl System for Electrodynamics {
    fn type_name() -> &'static str {
        "Electrodynamics"
    }
}

struct Gravity;

impl System for Gravity {
    fn type_name() -> &'static str {
        "Gravity"
    }
}

#[derive(Debug, Clone)]
enum Op {
    Create,
    Destroy(usize),
    AddMass(usize, u32),
    AddCharge(usize, i32),
    RemoveMass(usize),
    RemoveCharge(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        1 => any::<usize>().prop_map(Op::Destroy),
        3 => (any::<usize>(), any::<u32>()).prop_map(|(i, m)| Op::AddMass(i, m)),
        3 => (any::<usize>(), any::<i32>()).prop_map(|(i, c)| Op::AddCharge(i, c)),
        2 => any::<usize>().prop_map(Op::RemoveMass),
        2 => any::<usize>().prop_map(Op::RemoveCharge),
    ]
}

#[derive(Debug, Default, Clone, Copy)]
struct Expected {
    mass: Option<Mass>,
    charge: Option<Charge>,
}

fn world() -> Coordinator {
    let mut world = Coordinator::new(WorldConfig::default().with_max_entities(CAPACITY)).unwrap();
    let mass = world.register_component::<Mass>().unwrap();
    let charge = world.register_component::<Charge>().unwrap();
    world.register_system::<Electrodynamics>().unwrap();
    world.register_system::<Gravity>().unwrap();
    world
        .set_system_signature::<Electrodynamics>(Signature::EMPTY.with(mass).with(charge))
        .unwrap();
    world
        .set_system_signature::<Gravity>(Signature::EMPTY.with(mass))
        .unwrap();
    world
}

/// Pick a target for an operation: usually a live entity, sometimes a
/// recently destroyed one so stale-handle paths get exercised too.
fn pick(live: &[Entity], dead: &[Entity], index: usize) -> Option<Entity> {
    if !dead.is_empty() && index % 5 == 0 {
        return Some(dead[index % dead.len()]);
    }
    if live.is_empty() {
        None
    } else {
        Some(live[index % live.len()])
    }
}

fn apply(
    world: &mut Coordinator,
    model: &mut HashMap<Entity, Expected>,
    dead: &mut Vec<Entity>,
    op: &Op,
) {
    let mut live: Vec<Entity> = model.keys().copied().collect();
    live.sort();

    match *op {
        Op::Create => match world.create_entity() {
            Ok(e) => {
                assert!(!model.contains_key(&e), "live id handed out twice");
                assert_eq!(world.entity_signature(e), Ok(Signature::EMPTY));
                dead.retain(|d| *d != e);
                model.insert(e, Expected::default());
            }
            Err(err) => {
                assert_eq!(err, EcsError::CapacityExceeded { capacity: CAPACITY });
                assert_eq!(model.len(), CAPACITY);
            }
        },
        Op::Destroy(i) => {
            let Some(e) = pick(&live, dead, i) else { return };
            let result = world.destroy_entity(e);
            if model.remove(&e).is_some() {
                assert_eq!(result, Ok(()));
                dead.push(e);
            } else {
                assert_eq!(result, Err(EcsError::InvalidEntity(e)));
            }
        }
        Op::AddMass(i, m) => {
            let Some(e) = pick(&live, dead, i) else { return };
            let result = world.add_component(e, Mass(m));
            match model.get_mut(&e) {
                None => assert_eq!(result, Err(EcsError::InvalidEntity(e))),
                Some(expected) if expected.mass.is_some() => {
                    assert!(matches!(result, Err(EcsError::DuplicateComponent { .. })));
                }
                Some(expected) => {
                    assert_eq!(result, Ok(()));
                    expected.mass = Some(Mass(m));
                }
            }
        }
        Op::AddCharge(i, c) => {
            let Some(e) = pick(&live, dead, i) else { return };
            let result = world.add_component(e, Charge(c));
            match model.get_mut(&e) {
                None => assert_eq!(result, Err(EcsError::InvalidEntity(e))),
                Some(expected) if expected.charge.is_some() => {
                    assert!(matches!(result, Err(EcsError::DuplicateComponent { .. })));
                }
                Some(expected) => {
                    assert_eq!(result, Ok(()));
                    expected.charge = Some(Charge(c));
                }
            }
        }
        Op::RemoveMass(i) => {
            let Some(e) = pick(&live, dead, i) else { return };
            let result = world.remove_component::<Mass>(e);
            match model.get_mut(&e) {
                None => assert_eq!(result, Err(EcsError::InvalidEntity(e))),
                Some(expected) => match expected.mass.take() {
                    Some(mass) => assert_eq!(result, Ok(mass)),
                    None => assert!(matches!(result, Err(EcsError::ComponentMissing { .. }))),
                },
            }
        }
        Op::RemoveCharge(i) => {
            let Some(e) = pick(&live, dead, i) else { return };
            let result = world.remove_component::<Charge>(e);
            match model.get_mut(&e) {
                None => assert_eq!(result, Err(EcsError::InvalidEntity(e))),
                Some(expected) => match expected.charge.take() {
                    Some(charge) => assert_eq!(result, Ok(charge)),
                    None => assert!(matches!(result, Err(EcsError::ComponentMissing { .. }))),
                },
            }
        }
    }
}

fn check_invariants(world: &Coordinator, model: &HashMap<Entity, Expected>) {
    let mass_type = world.component_type::<Mass>().unwrap();
    let charge_type = world.component_type::<Charge>().unwrap();

    // Live ids are exactly the model's keys.
    let living: HashSet<Entity> = world.living_entities().collect();
    let expected_living: HashSet<Entity> = model.keys().copied().collect();
    assert_eq!(living, expected_living);
    assert_eq!(world.living_count(), model.len());

    // Signature bits mirror component presence, and values survive compaction.
    for (&e, expected) in model {
        let signature = world.entity_signature(e).unwrap();
        assert_eq!(signature.contains(mass_type), expected.mass.is_some());
        assert_eq!(signature.contains(charge_type), expected.charge.is_some());
        assert_eq!(world.get_component::<Mass>(e).ok().copied(), expected.mass);
        assert_eq!(world.get_component::<Charge>(e).ok().copied(), expected.charge);
    }

    // Array size equals the number of set bits, and the index maps invert.
    let masses = world.component_array::<Mass>().unwrap();
    assert_eq!(masses.len(), model.values().filter(|x| x.mass.is_some()).count());
    for slot in 0..masses.len() {
        let owner = masses.entity_at(slot).unwrap();
        assert_eq!(masses.slot_of(owner), Some(slot));
    }
    let charges = world.component_array::<Charge>().unwrap();
    assert_eq!(charges.len(), model.values().filter(|x| x.charge.is_some()).count());
    for slot in 0..charges.len() {
        let owner = charges.entity_at(slot).unwrap();
        assert_eq!(charges.slot_of(owner), Some(slot));
    }

    // System membership follows the signature test exactly.
    for record in world.systems().records() {
        let expected: HashSet<Entity> = model
            .keys()
            .copied()
            .filter(|&e| world.entity_signature(e).unwrap().matches(record.signature))
            .collect();
        let actual: HashSet<Entity> = record.entities.iter().copied().collect();
        assert_eq!(actual, expected, "membership of {}", record.name);
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_operation(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut world = world();
        let mut model = HashMap::new();
        let mut dead = Vec::new();
        for op in &ops {
            apply(&mut world, &mut model, &mut dead, op);
            check_invariants(&world, &model);
        }
    }

    #[test]
    fn prop_destroy_all_empties_everything(count in 1..CAPACITY, seed in any::<u32>()) {
        let mut world = world();
        let entities: Vec<Entity> = (0..count).map(|_| world.create_entity().unwrap()).collect();
        for (i, &e) in entities.iter().enumerate() {
            let bits = seed.rotate_left(i as u32);
            if bits & 1 == 1 {
                world.add_component(e, Mass(bits)).unwrap();
            }
            if bits & 2 == 2 {
                world.add_component(e, Charge(i as i32)).unwrap();
            }
        }
        for e in entities {
            world.destroy_entity(e).unwrap();
        }
        prop_assert_eq!(world.living_count(), 0);
        prop_assert!(world.component_array::<Mass>().unwrap().is_empty());
        prop_assert!(world.component_array::<Charge>().unwrap().is_empty());
        prop_assert!(world.systems().records().all(|r| r.entities.is_empty()));
    }
}

#[test]
fn full_world_reuses_freed_id() {
    let mut world = world();
    let entities: Vec<Entity> = (0..CAPACITY).map(|_| world.create_entity().unwrap()).collect();
    assert_eq!(
        world.create_entity(),
        Err(EcsError::CapacityExceeded { capacity: CAPACITY })
    );
    world.add_component(entities[3], Mass(9)).unwrap();
    world.destroy_entity(entities[3]).unwrap();

    let reused = world.create_entity().unwrap();
    assert_eq!(reused, entities[3]);
    assert_eq!(world.entity_signature(reused), Ok(Signature::EMPTY));
    assert!(!world.system_entities::<Gravity>().unwrap().contains(&reused));
}
