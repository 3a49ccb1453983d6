//! Positioned entities shared by tiles, stacked resources and creatures.

use farm_raid_core::{IVec2, Sprite, Visual};

/// Position, removal flag and current sprite of anything placed in the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    position: IVec2,
    marked_for_removal: bool,
    sprite: Sprite,
}

impl Entity {
    /// Creates an entity at `position` showing `sprite`.
    #[must_use]
    pub const fn new(position: IVec2, sprite: Sprite) -> Self {
        Self {
            position,
            marked_for_removal: false,
            sprite,
        }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// Pixel position of the entity.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Moves the entity to `position`.
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Flags the entity for removal at the owner's next cleanup.
    ///
    /// The flag is one-way; there is no way to clear it.
    pub fn mark_for_removal(&mut self) {
        self.marked_for_removal = true;
    }

    /// Whether the entity has been flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.marked_for_removal
    }

    /// Sprite currently shown for the entity.
    #[must_use]
    pub const fn sprite(&self) -> Sprite {
        self.sprite
    }

    /// Replaces the sprite shown for the entity.
    pub fn set_sprite(&mut self, sprite: Sprite) {
        self.sprite = sprite;
    }

    /// Drawable describing the entity's current appearance.
    #[must_use]
    pub const fn visual(&self) -> Visual {
        Visual::new(self.sprite, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_raid_core::SpriteGroup;

    const ART: SpriteGroup = SpriteGroup::new("stone", &["default", "cracked"]);

    #[test]
    fn removal_flag_is_one_way() {
        let mut entity = Entity::new(IVec2::new(4, 9), ART.default_sprite());
        assert!(!entity.is_marked_for_removal());
        entity.mark_for_removal();
        entity.mark_for_removal();
        assert!(entity.is_marked_for_removal());
        assert_eq!((entity.x(), entity.y()), (4, 9));
    }

    #[test]
    fn visual_reflects_sprite_and_position() {
        let mut entity = Entity::new(IVec2::ZERO, ART.default_sprite());
        entity.set_position(IVec2::new(32, 64));
        entity.set_sprite(ART.sprite("cracked").expect("declared"));
        let visual = entity.visual();
        assert_eq!(visual.position, IVec2::new(32, 64));
        assert_eq!(visual.sprite.name(), "cracked");
    }
}
