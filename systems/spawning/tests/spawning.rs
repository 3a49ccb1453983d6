use farm_raid_core::{Dimensions, IVec2, Inventory, RaiderSpecies};
use farm_raid_system_creatures::RaiderCollection;
use farm_raid_system_spawning::{Spawner, SpawnerSet};
use farm_raid_world::SpawnerDetail;

#[test]
fn interval_two_spawns_on_every_second_tick() {
    let mut spawner = Spawner::new(RaiderSpecies::Magpie, IVec2::new(64, 0), 2);
    let mut raiders = RaiderCollection::new();
    let mut inventory = Inventory::default();

    let mut spawn_ticks = Vec::new();
    for tick in 1..=6 {
        if spawner.tick(&mut raiders, &mut inventory).is_some() {
            spawn_ticks.push(tick);
        }
    }

    assert_eq!(spawn_ticks, vec![2, 4, 6], "expected one spawn per interval");
    assert_eq!(raiders.magpies().count(), 3);
    assert!(
        raiders.iter().all(|raider| raider.spawn() == IVec2::new(64, 0)),
        "raiders appear at the spawn point"
    );
}

#[test]
fn unaffordable_spawns_are_skipped_without_charge() {
    let mut spawner = Spawner::new(RaiderSpecies::Eagle, IVec2::ZERO, 1).with_cost(3);
    let mut raiders = RaiderCollection::new();
    let mut inventory = Inventory::new(5, 0);

    assert!(spawner.tick(&mut raiders, &mut inventory).is_some());
    assert_eq!(inventory.coins(), 2);

    assert!(spawner.tick(&mut raiders, &mut inventory).is_none());
    assert_eq!(inventory.coins(), 2, "a skipped spawn must not charge");
    assert_eq!(raiders.len(), 1);
}

#[test]
fn spawn_point_can_be_moved() {
    let mut spawner = Spawner::new(RaiderSpecies::Pigeon, IVec2::ZERO, 1);
    spawner.set_position(IVec2::new(10, 20));
    let mut raiders = RaiderCollection::new();
    let mut inventory = Inventory::default();

    let id = spawner
        .tick(&mut raiders, &mut inventory)
        .expect("interval of one fires every tick");

    assert_eq!(raiders.get(id).map(|raider| raider.position()), Some(IVec2::new(10, 20)));
}

#[test]
fn set_built_from_details_places_spawners_on_the_grid() {
    let details = [
        SpawnerDetail {
            species: RaiderSpecies::Magpie,
            column: 2,
            row: 1,
            interval: 3,
        },
        SpawnerDetail {
            species: RaiderSpecies::Pigeon,
            column: 0,
            row: 0,
            interval: 1,
        },
    ];
    let mut set = SpawnerSet::from_details(&details, Dimensions::new(32, 640, 480));
    let mut raiders = RaiderCollection::new();
    let mut inventory = Inventory::default();

    assert_eq!(set.len(), 2);
    assert_eq!(
        set.iter().next().map(Spawner::position),
        Some(IVec2::new(64, 32))
    );

    let mut created = 0;
    for _ in 0..3 {
        created += set.tick(&mut raiders, &mut inventory).len();
    }
    assert_eq!(created, 4, "three pigeons and one magpie");
    assert_eq!(raiders.pigeons().count(), 3);
    assert_eq!(raiders.magpies().count(), 1);
}
