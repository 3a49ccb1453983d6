//! Movable base shared by every non-player actor.

use farm_raid_core::{displacement, distance, heading_towards, IVec2, Sprite};
use farm_raid_world::Entity;

/// Positioned entity with a heading and a per-tick speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Creature {
    entity: Entity,
    direction: f64,
    speed: i32,
}

impl Creature {
    /// Creates a creature at `position` facing along increasing x.
    ///
    /// Negative speeds are clamped to zero.
    #[must_use]
    pub fn new(position: IVec2, sprite: Sprite, speed: i32) -> Self {
        Self {
            entity: Entity::new(position, sprite),
            direction: 0.0,
            speed: speed.max(0),
        }
    }

    /// Shared entity state.
    #[must_use]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Mutable shared entity state.
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Pixel position of the creature.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.entity.position()
    }

    /// Moves the creature to `position` without changing its heading.
    pub fn set_position(&mut self, position: IVec2) {
        self.entity.set_position(position);
    }

    /// Heading in degrees.
    #[must_use]
    pub const fn direction(&self) -> f64 {
        self.direction
    }

    /// Replaces the heading.
    pub fn set_direction(&mut self, direction: f64) {
        self.direction = direction;
    }

    /// Turns the creature to face `target`.
    pub fn face(&mut self, target: IVec2) {
        self.direction = heading_towards(self.position(), target);
    }

    /// Pixels travelled per tick.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Replaces the speed; negative values are clamped to zero.
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed.max(0);
    }

    /// Rounded distance from the creature to `point`.
    #[must_use]
    pub fn distance_from(&self, point: IVec2) -> i32 {
        distance(self.position(), point)
    }

    /// Advances one step along the current heading.
    pub fn move_forward(&mut self) {
        let next = self.position() + displacement(self.direction, self.speed);
        self.entity.set_position(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_raid_core::SpriteGroup;

    const ART: SpriteGroup = SpriteGroup::new("test", &["default"]);

    #[test]
    fn moves_along_heading() {
        let mut creature = Creature::new(IVec2::new(100, 100), ART.default_sprite(), 5);
        creature.face(IVec2::new(100, 0));
        creature.move_forward();
        assert_eq!(creature.position(), IVec2::new(100, 95));
    }

    #[test]
    fn distance_matches_rounded_euclidean_length() {
        let creature = Creature::new(IVec2::new(100, 100), ART.default_sprite(), 0);
        assert_eq!(creature.distance_from(IVec2::new(130, 140)), 50);
    }

    #[test]
    fn stationary_creatures_stay_put() {
        let mut creature = Creature::new(IVec2::new(7, 7), ART.default_sprite(), -3);
        assert_eq!(creature.speed(), 0);
        creature.set_direction(45.0);
        creature.move_forward();
        assert_eq!(creature.position(), IVec2::new(7, 7));
    }
}
