//! Ground tiles and the dispatch of ticks, interactions and tool use to the
//! entities stacked on them.

use farm_raid_core::{
    EngineState, IVec2, Inventory, ResourceKind, SpriteError, SpriteGroup, Tool, Visual,
};
use tracing::debug;

use crate::{Cabbage, Entity, StackedEntity};

/// Art set used by grass tiles.
pub const GRASS_ART: SpriteGroup = SpriteGroup::new("grass", &["default"]);
/// Art set used by farmland tiles.
pub const FARMLAND_ART: SpriteGroup = SpriteGroup::new("farmland", &["default", "tilled"]);
/// Art set used by water tiles.
pub const WATER_ART: SpriteGroup = SpriteGroup::new("water", &["default"]);
/// Art set used by rocky tiles.
pub const ROCK_ART: SpriteGroup = SpriteGroup::new("rock", &["default"]);

/// Coins charged for planting a cabbage.
pub const CABBAGE_COST: u32 = 2;

/// Ground variants a tile may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable ground that carries defenders and decorations.
    Grass,
    /// Walkable ground that accepts cabbages once tilled.
    Farmland {
        /// Whether the soil has been worked with a hoe.
        tilled: bool,
    },
    /// Impassable water that accepts nothing.
    Water,
    /// Walkable rocky ground that hosts ore deposits.
    Rock,
}

impl TileKind {
    const fn art(self) -> SpriteGroup {
        match self {
            Self::Grass => GRASS_ART,
            Self::Farmland { .. } => FARMLAND_ART,
            Self::Water => WATER_ART,
            Self::Rock => ROCK_ART,
        }
    }
}

/// Single grid cell of ground together with the entities stacked on it.
///
/// Stacked entities are kept in placement order, which is also the order in
/// which they are ticked, interacted with and drawn.
#[derive(Debug)]
pub struct Tile {
    entity: Entity,
    kind: TileKind,
    stack: Vec<Box<dyn StackedEntity>>,
}

impl Tile {
    /// Creates a tile of the provided kind at `position`.
    #[must_use]
    pub fn new(kind: TileKind, position: IVec2) -> Self {
        Self {
            entity: Entity::new(position, kind.art().default_sprite()),
            kind,
            stack: Vec::new(),
        }
    }

    /// Creates walkable grass at `position`.
    #[must_use]
    pub fn grass(position: IVec2) -> Self {
        Self::new(TileKind::Grass, position)
    }

    /// Creates untilled farmland at `position`.
    #[must_use]
    pub fn farmland(position: IVec2) -> Self {
        Self::new(TileKind::Farmland { tilled: false }, position)
    }

    /// Creates impassable water at `position`.
    #[must_use]
    pub fn water(position: IVec2) -> Self {
        Self::new(TileKind::Water, position)
    }

    /// Creates rocky ground at `position`.
    #[must_use]
    pub fn rock(position: IVec2) -> Self {
        Self::new(TileKind::Rock, position)
    }

    /// Shared entity state of the tile itself.
    #[must_use]
    pub const fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Pixel position of the tile's upper-left corner.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.entity.position()
    }

    /// Ground variant of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Whether creatures on foot may enter the tile.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        !matches!(self.kind, TileKind::Water)
    }

    /// Whether the tile is farmland that has been tilled.
    #[must_use]
    pub const fn is_tilled(&self) -> bool {
        matches!(self.kind, TileKind::Farmland { tilled: true })
    }

    /// Whether the tile's ground can carry the provided resource.
    #[must_use]
    pub const fn accepts(&self, resource: ResourceKind) -> bool {
        matches!(
            (self.kind, resource),
            (TileKind::Farmland { .. }, ResourceKind::Cabbage) | (TileKind::Rock, ResourceKind::Ore)
        )
    }

    /// Entities stacked on the tile in placement order.
    #[must_use]
    pub fn stacked_entities(&self) -> &[Box<dyn StackedEntity>] {
        &self.stack
    }

    /// Appends an entity to the top of the stack.
    pub fn place_on(&mut self, stacked: Box<dyn StackedEntity>) {
        self.stack.push(stacked);
    }

    /// Whether a live entity of the provided resource kind sits on the tile.
    #[must_use]
    pub fn holds(&self, resource: ResourceKind) -> bool {
        self.stack.iter().any(|stacked| {
            !stacked.entity().is_marked_for_removal() && stacked.resource() == Some(resource)
        })
    }

    /// Flags the first live entity of the provided resource kind for removal.
    ///
    /// Returns `false` when the tile holds no such entity.
    pub fn take_resource(&mut self, resource: ResourceKind) -> bool {
        let Some(stacked) = self.stack.iter_mut().find(|stacked| {
            !stacked.entity().is_marked_for_removal() && stacked.resource() == Some(resource)
        }) else {
            return false;
        };
        stacked.entity_mut().mark_for_removal();
        true
    }

    /// Works farmland soil so that it accepts seeds.
    ///
    /// Returns `false` when the tile is not farmland or is already tilled.
    pub fn till(&mut self) -> Result<bool, SpriteError> {
        match self.kind {
            TileKind::Farmland { tilled: false } => {
                self.entity.set_sprite(FARMLAND_ART.sprite("tilled")?);
                self.kind = TileKind::Farmland { tilled: true };
                debug!(x = self.entity.x(), y = self.entity.y(), "farmland_tilled");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Plants a cabbage when the soil is tilled, the stack is empty and
    /// `inventory` can pay [`CABBAGE_COST`].
    ///
    /// Nothing is deducted when planting is refused.
    pub fn plant(&mut self, inventory: &mut Inventory) -> bool {
        if !self.is_tilled() || !self.stack.is_empty() {
            return false;
        }
        if !inventory.try_spend_coins(CABBAGE_COST) {
            return false;
        }
        self.place_on(Box::new(Cabbage::new(self.position())));
        debug!(
            x = self.entity.x(),
            y = self.entity.y(),
            coins = inventory.coins(),
            "cabbage_planted"
        );
        true
    }

    /// Drops flagged entities, then ticks the survivors in stack order.
    pub fn tick(&mut self, engine: &EngineState) -> Result<(), SpriteError> {
        self.stack
            .retain(|stacked| !stacked.entity().is_marked_for_removal());
        for stacked in &mut self.stack {
            stacked.tick(engine)?;
        }
        Ok(())
    }

    /// Forwards an interaction to every interactable entity in stack order.
    pub fn interact(&mut self, inventory: &mut Inventory) -> Result<(), SpriteError> {
        for stacked in &mut self.stack {
            if stacked.entity().is_marked_for_removal() {
                continue;
            }
            if let Some(interactable) = stacked.as_interactable() {
                interactable.interact(inventory)?;
            }
        }
        Ok(())
    }

    /// Applies the held tool to the tile, then forwards it to every usable
    /// entity in stack order.
    pub fn use_tool(&mut self, inventory: &mut Inventory) -> Result<(), SpriteError> {
        let Some(tool) = inventory.held_tool() else {
            return Ok(());
        };

        match tool {
            Tool::Hoe => {
                let _ = self.till()?;
            }
            Tool::Seeds => {
                let _ = self.plant(inventory);
            }
            Tool::Pickaxe => {}
        }

        for stacked in &mut self.stack {
            if stacked.entity().is_marked_for_removal() {
                continue;
            }
            if let Some(usable) = stacked.as_usable() {
                usable.use_tool(tool, inventory)?;
            }
        }
        Ok(())
    }

    /// Drawables for the tile followed by its live stacked entities.
    #[must_use]
    pub fn render(&self) -> Vec<Visual> {
        let live = self
            .stack
            .iter()
            .filter(|stacked| !stacked.entity().is_marked_for_removal())
            .map(|stacked| stacked.entity().visual());
        std::iter::once(self.entity.visual()).chain(live).collect()
    }
}
