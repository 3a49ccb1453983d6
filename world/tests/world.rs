use farm_raid_core::{Dimensions, EngineState, IVec2, Inventory, ResourceKind, Tool};
use farm_raid_world::{Cabbage, Level, LoadError, Ore, Tile, TileKind, World};

const TILE: i32 = 32;

fn engine() -> EngineState {
    EngineState::new(0, Dimensions::new(TILE, 640, 480))
}

#[test]
fn lookups_snap_pixels_to_cells() {
    let mut world = World::new();
    world.place(Tile::grass(IVec2::new(0, 0)));
    world.place(Tile::water(IVec2::new(32, 0)));
    world.place(Tile::rock(IVec2::new(32, 32)));

    let found = world.tiles_at_position(IVec2::new(40, 31), TILE);
    assert_eq!(found.len(), 1, "only the water tile shares the cell");
    assert_eq!(found[0].kind(), TileKind::Water);

    assert!(world.tiles_at_position(IVec2::new(100, 100), TILE).is_empty());
}

#[test]
fn placement_keeps_duplicate_tiles() {
    let mut world = World::new();
    world.place(Tile::grass(IVec2::new(64, 64)));
    world.place(Tile::farmland(IVec2::new(64, 64)));

    let found = world.tiles_at_position(IVec2::new(70, 70), TILE);
    assert_eq!(found.len(), 2, "placing never evicts an existing tile");
    assert_eq!(world.len(), 2);
}

#[test]
fn selector_filters_with_arbitrary_predicates() {
    let mut world = World::new();
    let mut planted = Tile::farmland(IVec2::new(0, 0));
    planted.place_on(Box::new(Cabbage::new(IVec2::new(0, 0))));
    world.place(planted);
    world.place(Tile::farmland(IVec2::new(32, 0)));
    world.place(Tile::water(IVec2::new(64, 0)));

    let with_cabbage = world.tile_selector(|tile| tile.holds(ResourceKind::Cabbage));
    assert_eq!(with_cabbage.len(), 1);
    assert_eq!(with_cabbage[0].position(), IVec2::new(0, 0));

    let walkable = world.tile_selector(Tile::is_walkable);
    assert_eq!(walkable.len(), 2);
}

#[test]
fn all_tiles_returns_an_independent_list() {
    let mut world = World::new();
    world.place(Tile::grass(IVec2::new(0, 0)));
    world.place(Tile::grass(IVec2::new(32, 0)));

    let mut copy = world.all_tiles();
    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(world.all_tiles().len(), 2, "clearing the copy must not touch the world");
}

#[test]
fn mutating_a_tile_through_the_world_is_visible_to_later_queries() {
    let mut world = World::new();
    world.place(Tile::farmland(IVec2::new(0, 0)));

    for tile in world.tiles_at_position_mut(IVec2::ZERO, TILE) {
        assert!(tile.till().expect("art resolves"));
    }
    assert!(world.all_tiles()[0].is_tilled());
}

#[test]
fn walkability_requires_ground_without_water() {
    let mut world = World::new();
    world.place(Tile::grass(IVec2::new(0, 0)));
    world.place(Tile::water(IVec2::new(32, 0)));
    world.place(Tile::grass(IVec2::new(32, 0)));

    assert!(world.is_walkable_at(IVec2::new(5, 5), TILE));
    assert!(!world.is_walkable_at(IVec2::new(40, 5), TILE));
    assert!(!world.is_walkable_at(IVec2::new(-5, 5), TILE), "off-map is blocked");
}

#[test]
fn world_tick_cleans_up_stacks() {
    let mut world = World::new();
    let mut rock = Tile::rock(IVec2::ZERO);
    rock.place_on(Box::new(Ore::new(IVec2::ZERO)));
    world.place(rock);

    let mut inventory = Inventory::new(0, 0);
    inventory.hold(Some(Tool::Pickaxe));
    world
        .use_at(IVec2::new(3, 3), TILE, &mut inventory)
        .expect("no art lookups");
    assert_eq!(inventory.coins(), farm_raid_world::ORE_COIN_YIELD);
    assert_eq!(world.render().len(), 1, "mined ore is no longer drawn");
    assert_eq!(
        world.all_tiles()[0].stacked_entities().len(),
        1,
        "flagged ore stays stacked until the tick"
    );

    world.tick(&engine()).expect("no art lookups");
    assert_eq!(world.render().len(), 1);
    assert!(world.all_tiles()[0].stacked_entities().is_empty());
}

#[test]
fn hoe_on_grass_lays_farmland_on_top() {
    let mut world = World::new();
    world.place(Tile::grass(IVec2::new(32, 32)));
    let mut inventory = Inventory::new(0, 0);
    inventory.hold(Some(Tool::Hoe));

    world
        .use_at(IVec2::new(40, 40), TILE, &mut inventory)
        .expect("no art lookups");
    let kinds: Vec<TileKind> = world
        .tiles_at_position(IVec2::new(40, 40), TILE)
        .iter()
        .map(|tile| tile.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![TileKind::Grass, TileKind::Farmland { tilled: false }]
    );

    world
        .use_at(IVec2::new(40, 40), TILE, &mut inventory)
        .expect("art resolves");
    assert_eq!(world.len(), 2, "second swing tills instead of layering");
    assert!(world.tiles_at_position(IVec2::new(40, 40), TILE)[1].is_tilled());
}

#[test]
fn interaction_harvests_ripe_cabbages_only_in_the_target_cell() {
    let mut world = World::new();
    let mut near = Tile::farmland(IVec2::new(0, 0));
    near.place_on(Box::new(Cabbage::ripe(IVec2::new(0, 0)).expect("art resolves")));
    let mut far = Tile::farmland(IVec2::new(32, 0));
    far.place_on(Box::new(Cabbage::ripe(IVec2::new(32, 0)).expect("art resolves")));
    world.place(near);
    world.place(far);

    let mut inventory = Inventory::new(0, 0);
    world
        .interact_at(IVec2::new(10, 10), TILE, &mut inventory)
        .expect("no art lookups");
    assert_eq!(inventory.food(), farm_raid_world::CABBAGE_FOOD_YIELD);
    assert_eq!(
        world
            .tile_selector(|tile| tile.holds(ResourceKind::Cabbage))
            .len(),
        1
    );
}

#[test]
fn level_load_places_resources_and_starting_pools() {
    let map = "4x2\n.ff#\n~...\n";
    let details = "coins: 7\nfood: 2\nplayer: 1,1\nspawner: pigeon 3,1 120\nresource: cabbage 2,0\nresource: ore 3,0\n";
    let level = Level::load(map, details, Dimensions::new(TILE, 640, 480)).expect("valid level");

    assert_eq!(level.world.len(), 8);
    assert_eq!(level.inventory.coins(), 7);
    assert_eq!(level.inventory.food(), 2);
    assert_eq!(level.player_spawn, IVec2::new(32, 32));
    assert_eq!(level.spawners.len(), 1);

    let cabbage_tiles = level
        .world
        .tile_selector(|tile| tile.holds(ResourceKind::Cabbage));
    assert_eq!(cabbage_tiles.len(), 1);
    assert!(cabbage_tiles[0].is_tilled());
    assert_eq!(cabbage_tiles[0].position(), IVec2::new(64, 0));
    assert_eq!(
        level
            .world
            .tile_selector(|tile| tile.holds(ResourceKind::Ore))
            .len(),
        1
    );
}

#[test]
fn level_load_rejects_resources_without_ground() {
    let map = "2x1\n~.\n";
    let details = "player: 1,0\nresource: ore 0,0\n";
    let error = Level::load(map, details, Dimensions::new(TILE, 640, 480))
        .expect_err("water cannot carry ore");
    assert_eq!(
        error,
        LoadError::UnsupportedPlacement {
            resource: "ore",
            column: 0,
            row: 0,
        }
    );
}

#[test]
fn level_load_rejects_cells_outside_the_map() {
    let dimensions = Dimensions::new(TILE, 640, 480);
    assert_eq!(
        Level::load("2x1\n..\n", "player: 100000000,0\n", dimensions).expect_err("far away"),
        LoadError::OutOfBounds {
            record: "player",
            column: 100_000_000,
            row: 0,
        }
    );
    assert_eq!(
        Level::load("2x1\n..\n", "player: 1,0\nspawner: magpie -7,900 5\n", dimensions)
            .expect_err("negative column"),
        LoadError::OutOfBounds {
            record: "spawner",
            column: -7,
            row: 900,
        }
    );
    assert!(matches!(
        Level::load("2x1\n..\n", "player: 0,0\nresource: ore 0,1\n", dimensions),
        Err(LoadError::OutOfBounds { record: "ore", .. })
    ));
}

#[test]
fn level_load_rejects_a_second_cabbage_on_one_cell() {
    let details = "player: 0,0\nresource: cabbage 1,0\nresource: cabbage 1,0\n";
    let error = Level::load("2x1\n.f\n", details, Dimensions::new(TILE, 640, 480))
        .expect_err("cabbage needs an empty stack");
    assert_eq!(
        error,
        LoadError::UnsupportedPlacement {
            resource: "cabbage",
            column: 1,
            row: 0,
        }
    );
}
