#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile world of the farm raid simulation.
//!
//! The [`World`] is an unordered bag of [`Tile`] values. Each tile owns the
//! entities stacked on it and dispatches ticks, interactions and tool use to
//! them in placement order. Lookups snap pixel positions to grid cells, and
//! arbitrary predicates let callers select tiles without the world knowing
//! anything about the creatures that query it.

use farm_raid_core::{EngineState, IVec2, Inventory, SpriteError, Tool, Visual};
use tracing::debug;

mod entity;
mod loader;
mod stack;
mod tile;

pub use entity::Entity;
pub use loader::{
    Details, Level, LoadError, MapLayout, PlayerSpawn, ResourcePlacement, SpawnerDetail,
    StartingResources, TileSymbol,
};
pub use stack::{
    Cabbage, Interactable, Ore, StackedEntity, Usable, CABBAGE_ART, CABBAGE_FOOD_YIELD,
    CABBAGE_GROWTH_TICKS, ORE_ART, ORE_COIN_YIELD,
};
pub use tile::{
    Tile, TileKind, CABBAGE_COST, FARMLAND_ART, GRASS_ART, ROCK_ART, WATER_ART,
};

/// Authoritative collection of every tile in the world.
///
/// Placement never evicts an existing tile, so several tiles may share a grid
/// cell. Callers that need a single answer per cell must decide how to treat
/// the duplicates.
#[derive(Debug, Default)]
pub struct World {
    tiles: Vec<Tile>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tile to the world.
    pub fn place(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Number of tiles in the world, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the world holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Every tile whose position falls in the same `cell_size` grid cell as
    /// `point`.
    #[must_use]
    pub fn tiles_at_position(&self, point: IVec2, cell_size: i32) -> Vec<&Tile> {
        let cell = snap(point, cell_size);
        self.tiles
            .iter()
            .filter(|tile| snap(tile.position(), cell_size) == cell)
            .collect()
    }

    /// Mutable variant of [`World::tiles_at_position`].
    pub fn tiles_at_position_mut(&mut self, point: IVec2, cell_size: i32) -> Vec<&mut Tile> {
        let cell = snap(point, cell_size);
        self.tiles
            .iter_mut()
            .filter(|tile| snap(tile.position(), cell_size) == cell)
            .collect()
    }

    /// Every tile satisfying `predicate`.
    #[must_use]
    pub fn tile_selector<P>(&self, predicate: P) -> Vec<&Tile>
    where
        P: Fn(&Tile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }

    /// Every tile in the world.
    ///
    /// The returned list is a fresh vector; changing it leaves the world
    /// untouched.
    #[must_use]
    pub fn all_tiles(&self) -> Vec<&Tile> {
        self.tiles.iter().collect()
    }

    /// Whether the cell containing `point` exists and every tile in it is
    /// walkable.
    #[must_use]
    pub fn is_walkable_at(&self, point: IVec2, cell_size: i32) -> bool {
        let tiles = self.tiles_at_position(point, cell_size);
        !tiles.is_empty() && tiles.iter().all(|tile| tile.is_walkable())
    }

    /// Ticks every tile and the entities stacked on it.
    pub fn tick(&mut self, engine: &EngineState) -> Result<(), SpriteError> {
        for tile in &mut self.tiles {
            tile.tick(engine)?;
        }
        Ok(())
    }

    /// Forwards a player interaction to the tiles in the cell containing
    /// `point`.
    pub fn interact_at(
        &mut self,
        point: IVec2,
        cell_size: i32,
        inventory: &mut Inventory,
    ) -> Result<(), SpriteError> {
        for tile in self.tiles_at_position_mut(point, cell_size) {
            tile.interact(inventory)?;
        }
        Ok(())
    }

    /// Applies the held tool to the tiles in the cell containing `point`.
    ///
    /// A hoe used on a cell that only holds bare grass lays fresh farmland on
    /// top of it; the grass stays underneath.
    pub fn use_at(
        &mut self,
        point: IVec2,
        cell_size: i32,
        inventory: &mut Inventory,
    ) -> Result<(), SpriteError> {
        if inventory.held_tool() == Some(Tool::Hoe) {
            let tiles = self.tiles_at_position(point, cell_size);
            let bare_grass = !tiles.is_empty()
                && tiles.iter().all(|tile| {
                    tile.kind() == TileKind::Grass && tile.stacked_entities().is_empty()
                });
            if bare_grass {
                let origin = snap(point, cell_size) * cell_size.max(1);
                debug!(x = origin.x, y = origin.y, "farmland_laid");
                self.place(Tile::farmland(origin));
                return Ok(());
            }
        }

        for tile in self.tiles_at_position_mut(point, cell_size) {
            tile.use_tool(inventory)?;
        }
        Ok(())
    }

    /// Drawables for every tile, each followed by its stacked entities.
    #[must_use]
    pub fn render(&self) -> Vec<Visual> {
        self.tiles.iter().flat_map(Tile::render).collect()
    }
}

fn snap(point: IVec2, cell_size: i32) -> IVec2 {
    let cell_size = cell_size.max(1);
    IVec2::new(point.x.div_euclid(cell_size), point.y.div_euclid(cell_size))
}
