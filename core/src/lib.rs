#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the farm raid simulation.
//!
//! This crate defines the vocabulary every other crate speaks: countdown
//! [`Timer`] values, integer pixel geometry, the fixed world [`Dimensions`],
//! the player's [`Inventory`], the per-frame [`EngineState`] supplied by the
//! host, and the opaque [`Sprite`] handles that entities expose to renderers.
//! Nothing here owns simulation state; the world and the creature systems
//! build on these contracts and mutate them one tick at a time.

use std::fmt;

pub use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod geometry;
mod timer;

pub use geometry::{displacement, distance, heading_towards, Heading};
pub use timer::{Timer, TimerMode};

/// Fixed pixel measurements of the world supplied by the host engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    tile_size: i32,
    window_width: i32,
    window_height: i32,
}

impl Dimensions {
    /// Creates a new dimension descriptor.
    ///
    /// A non-positive `tile_size` is clamped to one pixel so that grid
    /// conversions never divide by zero.
    #[must_use]
    pub const fn new(tile_size: i32, window_width: i32, window_height: i32) -> Self {
        let tile_size = if tile_size < 1 { 1 } else { tile_size };
        Self {
            tile_size,
            window_width,
            window_height,
        }
    }

    /// Side length of a single grid cell measured in pixels.
    #[must_use]
    pub const fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Size of the visible window measured in pixels.
    #[must_use]
    pub const fn window_size(&self) -> IVec2 {
        IVec2::new(self.window_width, self.window_height)
    }

    /// Centre of the visible window measured in pixels.
    #[must_use]
    pub const fn window_center(&self) -> IVec2 {
        IVec2::new(self.window_width / 2, self.window_height / 2)
    }

    /// Converts a pixel coordinate into the grid cell containing it.
    #[must_use]
    pub const fn pixel_to_tile(&self, pixel: i32) -> i32 {
        pixel.div_euclid(self.tile_size)
    }

    /// Converts a grid cell into the pixel coordinate of its upper-left corner.
    ///
    /// Cells too far out to be represented saturate at the `i32` bounds.
    #[must_use]
    pub const fn tile_to_pixel(&self, cell: i32) -> i32 {
        cell.saturating_mul(self.tile_size)
    }

    /// Converts a grid cell pair into the pixel position of its upper-left corner.
    #[must_use]
    pub const fn cell_to_pixel(&self, column: i32, row: i32) -> IVec2 {
        IVec2::new(self.tile_to_pixel(column), self.tile_to_pixel(row))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(32, 640, 480)
    }
}

/// Tools the player may hold while using tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Tills farmland so that it accepts seeds.
    Hoe,
    /// Plants a cabbage on tilled, empty farmland.
    Seeds,
    /// Breaks ore deposits into coins.
    Pickaxe,
}

/// Resource pools owned by the player.
///
/// The simulation reads and mutates these pools as part of theft, cost and
/// recovery logic. Amounts never go negative: withdrawals either succeed in
/// full or take whatever remains, depending on the operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    coins: u32,
    food: u32,
    held_tool: Option<Tool>,
}

impl Inventory {
    /// Creates an inventory with the provided starting pools and no tool.
    #[must_use]
    pub const fn new(coins: u32, food: u32) -> Self {
        Self {
            coins,
            food,
            held_tool: None,
        }
    }

    /// Number of coins currently held.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Units of food currently held.
    #[must_use]
    pub const fn food(&self) -> u32 {
        self.food
    }

    /// Tool currently held by the player, if any.
    #[must_use]
    pub const fn held_tool(&self) -> Option<Tool> {
        self.held_tool
    }

    /// Replaces the held tool.
    pub fn hold(&mut self, tool: Option<Tool>) {
        self.held_tool = tool;
    }

    /// Adds coins to the pool.
    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Adds food to the pool.
    pub fn add_food(&mut self, amount: u32) {
        self.food = self.food.saturating_add(amount);
    }

    /// Reports whether `amount` coins can be spent.
    #[must_use]
    pub const fn can_afford(&self, amount: u32) -> bool {
        self.coins >= amount
    }

    /// Spends exactly `amount` coins, or nothing when the pool is short.
    pub fn try_spend_coins(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.coins -= amount;
        true
    }

    /// Removes up to `amount` coins and reports how many were taken.
    pub fn take_coins(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.coins);
        self.coins -= taken;
        taken
    }

    /// Removes up to `amount` food and reports how many units were taken.
    pub fn take_food(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.food);
        self.food -= taken;
        taken
    }
}

/// Errors raised when looking up art.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpriteError {
    /// The requested sprite name is not part of the art set.
    #[error("sprite '{name}' not found in art set '{group}'")]
    NotFound {
        /// Name of the art set that was searched.
        group: &'static str,
        /// Sprite name that was requested.
        name: String,
    },
}

/// Opaque handle naming one frame of an art set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sprite {
    group: &'static str,
    name: &'static str,
}

impl Sprite {
    /// Art set the sprite belongs to.
    #[must_use]
    pub const fn group(&self) -> &'static str {
        self.group
    }

    /// Symbolic name of the sprite inside its art set.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

/// Named collection of sprites belonging to one kind of entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteGroup {
    name: &'static str,
    sprites: &'static [&'static str],
}

impl SpriteGroup {
    /// Declares an art set with the provided sprite names.
    ///
    /// The first name is treated as the default frame.
    #[must_use]
    pub const fn new(name: &'static str, sprites: &'static [&'static str]) -> Self {
        Self { name, sprites }
    }

    /// Name of the art set.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a sprite by symbolic name.
    pub fn sprite(&self, name: &str) -> Result<Sprite, SpriteError> {
        self.sprites
            .iter()
            .copied()
            .find(|candidate| *candidate == name)
            .map(|found| Sprite {
                group: self.name,
                name: found,
            })
            .ok_or_else(|| SpriteError::NotFound {
                group: self.name,
                name: name.to_owned(),
            })
    }

    /// Returns the first declared sprite of the art set.
    #[must_use]
    pub fn default_sprite(&self) -> Sprite {
        Sprite {
            group: self.name,
            name: self.sprites.first().copied().unwrap_or("default"),
        }
    }
}

/// Single drawable produced by a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visual {
    /// Sprite to draw.
    pub sprite: Sprite,
    /// Upper-left pixel position of the sprite.
    pub position: IVec2,
}

impl Visual {
    /// Creates a new visual.
    #[must_use]
    pub const fn new(sprite: Sprite, position: IVec2) -> Self {
        Self { sprite, position }
    }
}

/// Keys the simulation reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Moves the player towards decreasing y.
    Up,
    /// Moves the player towards increasing y.
    Down,
    /// Moves the player towards decreasing x.
    Left,
    /// Moves the player towards increasing x.
    Right,
    /// Interacts with the tiles under the pointer or player.
    Interact,
    /// Uses the held tool on the tiles under the pointer or player.
    Use,
}

/// Frame information supplied by the host engine before each tick.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    frame: u64,
    dimensions: Dimensions,
    pressed: Vec<Key>,
    pointer: Option<IVec2>,
    clicked: bool,
}

impl EngineState {
    /// Creates frame information with no input.
    #[must_use]
    pub fn new(frame: u64, dimensions: Dimensions) -> Self {
        Self {
            frame,
            dimensions,
            pressed: Vec::new(),
            pointer: None,
            clicked: false,
        }
    }

    /// Marks the provided key as held during this frame.
    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
        self
    }

    /// Records a pointer position and whether it was clicked this frame.
    #[must_use]
    pub fn with_pointer(mut self, pointer: IVec2, clicked: bool) -> Self {
        self.pointer = Some(pointer);
        self.clicked = clicked;
        self
    }

    /// Index of the frame being simulated.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Fixed world dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Reports whether the key is held this frame.
    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Pointer position in pixels, if the pointer is inside the window.
    #[must_use]
    pub const fn pointer(&self) -> Option<IVec2> {
        self.pointer
    }

    /// Whether the pointer was clicked this frame.
    #[must_use]
    pub const fn clicked(&self) -> bool {
        self.clicked
    }
}

/// Bird species that raid the farm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RaiderSpecies {
    /// Steals coins from the player.
    Magpie,
    /// Steals food from the player.
    Eagle,
    /// Steals planted cabbages.
    Pigeon,
}

impl RaiderSpecies {
    /// Every species in declaration order.
    pub const ALL: [RaiderSpecies; 3] = [Self::Magpie, Self::Eagle, Self::Pigeon];

    /// Lower-case identifier used by detail files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Magpie => "magpie",
            Self::Eagle => "eagle",
            Self::Pigeon => "pigeon",
        }
    }

    /// Parses a lower-case species identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|species| species.as_str() == name)
    }
}

impl fmt::Display for RaiderSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources that can be stacked on tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A growing crop planted on farmland.
    Cabbage,
    /// A mineral deposit found on rocky ground.
    Ore,
}

impl ResourceKind {
    /// Lower-case identifier used by detail files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cabbage => "cabbage",
            Self::Ore => "ore",
        }
    }

    /// Parses a lower-case resource identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Cabbage, Self::Ore]
            .into_iter()
            .find(|kind| kind.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ART: SpriteGroup = SpriteGroup::new("magpie", &["up", "down"]);

    #[test]
    fn sprite_lookup_resolves_known_names() {
        let sprite = ART.sprite("down").expect("down is declared");
        assert_eq!(sprite.group(), "magpie");
        assert_eq!(sprite.name(), "down");
        assert_eq!(ART.default_sprite().name(), "up");
    }

    #[test]
    fn sprite_lookup_reports_unknown_names() {
        let error = ART.sprite("left").expect_err("left is not declared");
        assert_eq!(
            error,
            SpriteError::NotFound {
                group: "magpie",
                name: "left".to_owned(),
            }
        );
    }

    #[test]
    fn pixel_conversions_snap_to_cells() {
        let dimensions = Dimensions::new(32, 640, 480);
        assert_eq!(dimensions.pixel_to_tile(0), 0);
        assert_eq!(dimensions.pixel_to_tile(31), 0);
        assert_eq!(dimensions.pixel_to_tile(32), 1);
        assert_eq!(dimensions.pixel_to_tile(-1), -1);
        assert_eq!(dimensions.tile_to_pixel(3), 96);
        assert_eq!(dimensions.window_center(), IVec2::new(320, 240));
    }

    #[test]
    fn zero_tile_size_is_clamped() {
        assert_eq!(Dimensions::new(0, 10, 10).tile_size(), 1);
    }

    #[test]
    fn far_cells_saturate_instead_of_overflowing() {
        let dims = Dimensions::new(32, 640, 480);
        assert_eq!(dims.tile_to_pixel(100_000_000), i32::MAX);
        assert_eq!(dims.tile_to_pixel(-100_000_000), i32::MIN);
    }

    #[test]
    fn withdrawals_never_overdraw() {
        let mut inventory = Inventory::new(2, 1);
        assert_eq!(inventory.take_coins(5), 2);
        assert_eq!(inventory.coins(), 0);
        assert_eq!(inventory.take_food(3), 1);
        assert!(!inventory.try_spend_coins(1));
        inventory.add_coins(4);
        assert!(inventory.try_spend_coins(4));
        assert_eq!(inventory.coins(), 0);
    }

    #[test]
    fn species_names_round_trip() {
        for species in RaiderSpecies::ALL {
            assert_eq!(RaiderSpecies::from_name(species.as_str()), Some(species));
        }
        assert_eq!(RaiderSpecies::from_name("crow"), None);
        assert_eq!(ResourceKind::from_name("ore"), Some(ResourceKind::Ore));
    }

    #[test]
    fn engine_state_tracks_input() {
        let state = EngineState::new(7, Dimensions::default())
            .with_key(Key::Up)
            .with_key(Key::Up)
            .with_pointer(IVec2::new(3, 4), true);
        assert!(state.is_pressed(Key::Up));
        assert!(!state.is_pressed(Key::Down));
        assert_eq!(state.pointer(), Some(IVec2::new(3, 4)));
        assert!(state.clicked());
        assert_eq!(state.frame(), 7);
    }
}
