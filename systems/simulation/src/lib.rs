#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-order host for one farm raid level.
//!
//! A [`Simulation`] owns the world, the player's pools, every creature and
//! every spawner, and advances them in the same order on every tick:
//!
//! 1. player input (movement, interaction, tool use);
//! 2. raiders, then defenders;
//! 3. tiles and their stacked entities;
//! 4. spawners;
//! 5. the defender interaction pass;
//! 6. removal of everything flagged during the tick.
//!
//! Rendering collects tiles first, then raiders, then defenders.

use farm_raid_core::{Dimensions, EngineState, IVec2, Inventory, Key, SpriteError, Visual};
use farm_raid_system_creatures::{
    CreatureCollection, Defender, DefenderKind, Hive, RaidContext, RaiderCollection, Scarecrow,
};
use farm_raid_system_spawning::SpawnerSet;
use farm_raid_world::{Level, LoadError, World};
use thiserror::Error;
use tracing::{debug, info};

mod config;
mod player;

pub use config::SimulationConfig;
pub use player::Player;

/// Failures surfaced while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The map or detail file could not be turned into a level.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// An art set did not contain a requested sprite.
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Complete state of a running level.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    inventory: Inventory,
    player: Player,
    raiders: RaiderCollection,
    defenders: CreatureCollection,
    spawners: SpawnerSet,
    ticks: u64,
}

impl Simulation {
    /// Parses the map and detail files and builds a simulation from them.
    pub fn load(map: &str, details: &str, config: SimulationConfig) -> Result<Self, SimulationError> {
        let level = Level::load(map, details, config.dimensions())?;
        Ok(Self::from_level(level, config))
    }

    /// Builds a simulation around an assembled level.
    #[must_use]
    pub fn from_level(level: Level, config: SimulationConfig) -> Self {
        let Level {
            world,
            mut inventory,
            player_spawn,
            spawners,
        } = level;
        inventory.hold(config.held_tool);
        let spawners = SpawnerSet::from_details(&spawners, config.dimensions());
        info!(
            spawners = spawners.len(),
            coins = inventory.coins(),
            food = inventory.food(),
            "simulation_ready"
        );

        Self {
            config,
            world,
            inventory,
            player: Player::new(player_spawn, config.player_speed),
            raiders: RaiderCollection::new(),
            defenders: CreatureCollection::new(),
            spawners,
            ticks: 0,
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self, engine: &EngineState) -> Result<(), SimulationError> {
        let dimensions = self.dimensions();
        let tile_size = dimensions.tile_size();

        let _ = self.player.steer(engine, &self.world, tile_size);
        self.apply_actions(engine)?;

        let mut raid = RaidContext {
            world: &mut self.world,
            inventory: &mut self.inventory,
            player: Some(self.player.position()),
            dimensions,
        };
        self.raiders.tick(&mut raid)?;
        self.defenders.tick(&mut self.raiders, dimensions)?;

        self.world.tick(engine)?;
        let _ = self.spawners.tick(&mut self.raiders, &mut self.inventory);
        self.defenders.interact(&mut self.raiders, dimensions)?;

        let _ = self.raiders.cleanup(&mut self.inventory);
        let _ = self.defenders.cleanup();
        self.ticks += 1;
        Ok(())
    }

    fn apply_actions(&mut self, engine: &EngineState) -> Result<(), SpriteError> {
        let tile_size = self.dimensions().tile_size();
        let point = engine
            .pointer()
            .filter(|_| engine.clicked())
            .unwrap_or_else(|| self.player.position());

        if engine.is_pressed(Key::Interact) || engine.clicked() {
            self.world
                .interact_at(point, tile_size, &mut self.inventory)?;
        }
        if engine.is_pressed(Key::Use) {
            self.world.use_at(point, tile_size, &mut self.inventory)?;
        }
        Ok(())
    }

    /// Places a scarecrow or hive in the cell containing `point`.
    ///
    /// Returns `false` without charging anything when the kind cannot be
    /// built, the cell is not walkable or the cost cannot be paid.
    pub fn build(&mut self, kind: DefenderKind, point: IVec2) -> bool {
        let cost = match kind {
            DefenderKind::Scarecrow => self.config.scarecrow_cost,
            DefenderKind::Hive => self.config.hive_cost,
            DefenderKind::GuardBee => return false,
        };
        let dimensions = self.dimensions();
        if !self.world.is_walkable_at(point, dimensions.tile_size()) {
            return false;
        }
        if !self.inventory.try_spend_coins(cost) {
            return false;
        }

        let origin = IVec2::new(
            dimensions.tile_to_pixel(dimensions.pixel_to_tile(point.x)),
            dimensions.tile_to_pixel(dimensions.pixel_to_tile(point.y)),
        );
        let defender: Box<dyn Defender> = match kind {
            DefenderKind::Hive => Box::new(Hive::new(origin)),
            _ => Box::new(Scarecrow::new(origin)),
        };
        self.defenders.add(defender);
        debug!(?kind, x = origin.x, y = origin.y, cost, "defender_built");
        true
    }

    /// Drawables for the whole level: tiles, then raiders, then defenders.
    #[must_use]
    pub fn render(&self) -> Vec<Visual> {
        let mut visuals = self.world.render();
        visuals.extend(self.raiders.render());
        visuals.extend(self.defenders.render());
        visuals
    }

    /// Settings the simulation was built with.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// World dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.config.dimensions()
    }

    /// Number of ticks simulated so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tile world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable tile world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Player resource pools.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable player resource pools.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Player avatar.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player avatar.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Live raiders.
    #[must_use]
    pub const fn raiders(&self) -> &RaiderCollection {
        &self.raiders
    }

    /// Mutable raiders.
    pub fn raiders_mut(&mut self) -> &mut RaiderCollection {
        &mut self.raiders
    }

    /// Live defenders.
    #[must_use]
    pub const fn defenders(&self) -> &CreatureCollection {
        &self.defenders
    }

    /// Level spawners.
    #[must_use]
    pub const fn spawners(&self) -> &SpawnerSet {
        &self.spawners
    }

    /// Mutable level spawners.
    pub fn spawners_mut(&mut self) -> &mut SpawnerSet {
        &mut self.spawners
    }
}
