//! Tunable settings read from TOML.

use farm_raid_core::{Dimensions, Tool};
use serde::Deserialize;

use crate::SimulationError;

/// Settings of a simulation run.
///
/// Every key is optional; missing keys keep their default value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Edge length of a tile in pixels.
    pub tile_size: i32,
    /// Window width in pixels.
    pub window_width: i32,
    /// Window height in pixels.
    pub window_height: i32,
    /// Coins charged for a scarecrow.
    pub scarecrow_cost: u32,
    /// Coins charged for a hive.
    pub hive_cost: u32,
    /// Pixels the player moves per tick while a direction key is held.
    pub player_speed: i32,
    /// Tool in the player's hand at the start of the run.
    pub held_tool: Option<Tool>,
}

impl SimulationConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, SimulationError> {
        Ok(toml::from_str(contents)?)
    }

    /// World dimensions described by the configuration.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.tile_size, self.window_width, self.window_height)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            window_width: 640,
            window_height: 480,
            scarecrow_cost: 5,
            hive_cost: 15,
            player_speed: 4,
            held_tool: None,
        }
    }
}
