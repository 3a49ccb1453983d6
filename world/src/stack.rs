//! Entities stacked on top of tiles and the capabilities they expose.
//!
//! A tile never inspects the concrete type of what it carries. Each stacked
//! entity declares its capabilities through [`StackedEntity::as_interactable`]
//! and [`StackedEntity::as_usable`], and the tile dispatch loops ask for them
//! one entity at a time.

use std::fmt;

use farm_raid_core::{
    EngineState, IVec2, Inventory, ResourceKind, SpriteError, SpriteGroup, Timer, Tool,
};
use tracing::debug;

use crate::Entity;

/// Art set used by cabbages.
pub const CABBAGE_ART: SpriteGroup = SpriteGroup::new("cabbage", &["seedling", "ripe"]);
/// Art set used by ore deposits.
pub const ORE_ART: SpriteGroup = SpriteGroup::new("ore", &["default"]);

/// Ticks a freshly planted cabbage needs before it can be harvested.
pub const CABBAGE_GROWTH_TICKS: u32 = 300;
/// Food granted by harvesting a ripe cabbage.
pub const CABBAGE_FOOD_YIELD: u32 = 5;
/// Coins granted by breaking an ore deposit.
pub const ORE_COIN_YIELD: u32 = 4;

/// Anything that can be placed on a tile.
pub trait StackedEntity: fmt::Debug {
    /// Shared entity state.
    fn entity(&self) -> &Entity;

    /// Mutable shared entity state.
    fn entity_mut(&mut self) -> &mut Entity;

    /// Resource represented by the entity, if any.
    fn resource(&self) -> Option<ResourceKind> {
        None
    }

    /// Advances the entity by one tick.
    fn tick(&mut self, _engine: &EngineState) -> Result<(), SpriteError> {
        Ok(())
    }

    /// Interaction capability, when the entity reacts to the player's touch.
    fn as_interactable(&mut self) -> Option<&mut dyn Interactable> {
        None
    }

    /// Tool capability, when the entity reacts to a held tool.
    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        None
    }
}

/// Capability of reacting to a direct player interaction.
pub trait Interactable {
    /// Handles an interaction, crediting any yield to `inventory`.
    fn interact(&mut self, inventory: &mut Inventory) -> Result<(), SpriteError>;
}

/// Capability of reacting to a held tool.
pub trait Usable {
    /// Handles the use of `tool`, crediting any yield to `inventory`.
    fn use_tool(&mut self, tool: Tool, inventory: &mut Inventory) -> Result<(), SpriteError>;
}

/// Crop that ripens over time and is harvested for food.
#[derive(Clone, Debug)]
pub struct Cabbage {
    entity: Entity,
    growth: Timer,
}

impl Cabbage {
    /// Plants a seedling at `position`.
    #[must_use]
    pub fn new(position: IVec2) -> Self {
        Self {
            entity: Entity::new(position, CABBAGE_ART.default_sprite()),
            growth: Timer::fixed(CABBAGE_GROWTH_TICKS),
        }
    }

    /// Creates a cabbage that is already ripe.
    pub fn ripe(position: IVec2) -> Result<Self, SpriteError> {
        let mut cabbage = Self::new(position);
        while !cabbage.growth.advance() {}
        cabbage.entity.set_sprite(CABBAGE_ART.sprite("ripe")?);
        Ok(cabbage)
    }

    /// Whether the cabbage can be harvested.
    #[must_use]
    pub const fn is_ripe(&self) -> bool {
        self.growth.is_finished()
    }
}

impl StackedEntity for Cabbage {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn resource(&self) -> Option<ResourceKind> {
        Some(ResourceKind::Cabbage)
    }

    fn tick(&mut self, _engine: &EngineState) -> Result<(), SpriteError> {
        if self.is_ripe() {
            return Ok(());
        }
        if self.growth.advance() {
            self.entity.set_sprite(CABBAGE_ART.sprite("ripe")?);
        }
        Ok(())
    }

    fn as_interactable(&mut self) -> Option<&mut dyn Interactable> {
        Some(self)
    }
}

impl Interactable for Cabbage {
    fn interact(&mut self, inventory: &mut Inventory) -> Result<(), SpriteError> {
        if !self.is_ripe() {
            return Ok(());
        }
        inventory.add_food(CABBAGE_FOOD_YIELD);
        self.entity.mark_for_removal();
        debug!(
            x = self.entity.x(),
            y = self.entity.y(),
            food = inventory.food(),
            "cabbage_harvested"
        );
        Ok(())
    }
}

/// Mineral deposit broken with a pickaxe for coins.
#[derive(Clone, Debug)]
pub struct Ore {
    entity: Entity,
}

impl Ore {
    /// Places a deposit at `position`.
    #[must_use]
    pub fn new(position: IVec2) -> Self {
        Self {
            entity: Entity::new(position, ORE_ART.default_sprite()),
        }
    }
}

impl StackedEntity for Ore {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn resource(&self) -> Option<ResourceKind> {
        Some(ResourceKind::Ore)
    }

    fn as_usable(&mut self) -> Option<&mut dyn Usable> {
        Some(self)
    }
}

impl Usable for Ore {
    fn use_tool(&mut self, tool: Tool, inventory: &mut Inventory) -> Result<(), SpriteError> {
        if tool != Tool::Pickaxe {
            return Ok(());
        }
        inventory.add_coins(ORE_COIN_YIELD);
        self.entity.mark_for_removal();
        debug!(
            x = self.entity.x(),
            y = self.entity.y(),
            coins = inventory.coins(),
            "ore_mined"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_raid_core::Dimensions;

    fn engine() -> EngineState {
        EngineState::new(0, Dimensions::default())
    }

    #[test]
    fn cabbage_ripens_after_growth_period() {
        let mut cabbage = Cabbage::new(IVec2::ZERO);
        assert_eq!(cabbage.entity().sprite().name(), "seedling");
        for _ in 0..CABBAGE_GROWTH_TICKS - 1 {
            cabbage.tick(&engine()).expect("art resolves");
        }
        assert!(!cabbage.is_ripe());
        cabbage.tick(&engine()).expect("art resolves");
        assert!(cabbage.is_ripe());
        assert_eq!(cabbage.entity().sprite().name(), "ripe");
    }

    #[test]
    fn unripe_cabbage_ignores_interaction() {
        let mut cabbage = Cabbage::new(IVec2::ZERO);
        let mut inventory = Inventory::new(0, 0);
        cabbage.interact(&mut inventory).expect("no art lookups");
        assert_eq!(inventory.food(), 0);
        assert!(!cabbage.entity().is_marked_for_removal());
    }

    #[test]
    fn ripe_cabbage_is_harvested_for_food() {
        let mut cabbage = Cabbage::ripe(IVec2::ZERO).expect("art resolves");
        let mut inventory = Inventory::new(0, 1);
        cabbage.interact(&mut inventory).expect("no art lookups");
        assert_eq!(inventory.food(), 1 + CABBAGE_FOOD_YIELD);
        assert!(cabbage.entity().is_marked_for_removal());
    }

    #[test]
    fn ore_requires_pickaxe() {
        let mut ore = Ore::new(IVec2::ZERO);
        let mut inventory = Inventory::new(0, 0);
        ore.use_tool(Tool::Hoe, &mut inventory).expect("no art lookups");
        assert_eq!(inventory.coins(), 0);
        ore.use_tool(Tool::Pickaxe, &mut inventory)
            .expect("no art lookups");
        assert_eq!(inventory.coins(), ORE_COIN_YIELD);
        assert!(ore.entity().is_marked_for_removal());
    }

    #[test]
    fn capabilities_are_declared_per_type() {
        let mut cabbage = Cabbage::new(IVec2::ZERO);
        let mut ore = Ore::new(IVec2::ZERO);
        assert!(cabbage.as_interactable().is_some());
        assert!(cabbage.as_usable().is_none());
        assert!(ore.as_interactable().is_none());
        assert!(ore.as_usable().is_some());
    }
}
