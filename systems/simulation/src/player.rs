//! Player avatar steered by the host's direction keys.

use farm_raid_core::{EngineState, IVec2, Key};
use farm_raid_world::World;

/// Position and pace of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    position: IVec2,
    speed: i32,
}

impl Player {
    /// Places the player at `position`.
    #[must_use]
    pub fn new(position: IVec2, speed: i32) -> Self {
        Self {
            position,
            speed: speed.max(0),
        }
    }

    /// Current position in pixels.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Teleports the player.
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Pixels moved per tick.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Moves one step along the held direction keys.
    ///
    /// The step is refused when it would end outside the world or on a cell
    /// that is not walkable. Returns whether the player moved.
    pub fn steer(&mut self, engine: &EngineState, world: &World, cell_size: i32) -> bool {
        let mut step = IVec2::ZERO;
        if engine.is_pressed(Key::Up) {
            step.y -= 1;
        }
        if engine.is_pressed(Key::Down) {
            step.y += 1;
        }
        if engine.is_pressed(Key::Left) {
            step.x -= 1;
        }
        if engine.is_pressed(Key::Right) {
            step.x += 1;
        }
        if step == IVec2::ZERO || self.speed == 0 {
            return false;
        }

        let candidate = self.position + step * self.speed;
        if !world.is_walkable_at(candidate, cell_size) {
            return false;
        }
        self.position = candidate;
        true
    }
}
