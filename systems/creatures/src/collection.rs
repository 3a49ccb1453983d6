//! Owners of every live raider and defender.
//!
//! Both collections drop flagged members before anything reads the list, so
//! a member flagged for removal never acts again and never shows up in a
//! later pass.

use farm_raid_core::{distance, Dimensions, IVec2, Inventory, RaiderSpecies, SpriteError, Visual};
use tracing::debug;

use crate::{Defender, DefenderContext, DefenderKind, RaidContext, Raider, RaiderId};

/// Every raider currently in the world.
#[derive(Debug, Default)]
pub struct RaiderCollection {
    raiders: Vec<Raider>,
    next_id: u64,
}

impl RaiderCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a raider, assigning it a fresh identifier.
    pub fn insert(&mut self, mut raider: Raider) -> RaiderId {
        let id = RaiderId::new(self.next_id);
        self.next_id += 1;
        raider.assign_id(id);
        self.raiders.push(raider);
        id
    }

    /// Creates a raider of `species` at `position` and adds it.
    pub fn spawn(&mut self, species: RaiderSpecies, position: IVec2) -> RaiderId {
        self.insert(Raider::new(species, position))
    }

    /// Number of raiders held, flagged ones included until the next cleanup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raiders.len()
    }

    /// Whether the collection holds no raiders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raiders.is_empty()
    }

    /// Raider with the provided identifier.
    #[must_use]
    pub fn get(&self, id: RaiderId) -> Option<&Raider> {
        self.raiders.iter().find(|raider| raider.id() == id)
    }

    /// Mutable raider with the provided identifier.
    pub fn get_mut(&mut self, id: RaiderId) -> Option<&mut Raider> {
        self.raiders.iter_mut().find(|raider| raider.id() == id)
    }

    /// Raiders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Raider> {
        self.raiders.iter()
    }

    /// Mutable raiders in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Raider> {
        self.raiders.iter_mut()
    }

    /// Raiders of one species in insertion order.
    pub fn of_species(&self, species: RaiderSpecies) -> impl Iterator<Item = &Raider> {
        self.raiders
            .iter()
            .filter(move |raider| raider.species() == species)
    }

    /// Every magpie.
    pub fn magpies(&self) -> impl Iterator<Item = &Raider> {
        self.of_species(RaiderSpecies::Magpie)
    }

    /// Every eagle.
    pub fn eagles(&self) -> impl Iterator<Item = &Raider> {
        self.of_species(RaiderSpecies::Eagle)
    }

    /// Every pigeon.
    pub fn pigeons(&self) -> impl Iterator<Item = &Raider> {
        self.of_species(RaiderSpecies::Pigeon)
    }

    /// Closest live raider within `range` pixels of `point`.
    #[must_use]
    pub fn nearest_within(&self, point: IVec2, range: i32) -> Option<RaiderId> {
        self.raiders
            .iter()
            .filter(|raider| !raider.is_marked_for_removal())
            .map(|raider| (raider.id(), distance(point, raider.position())))
            .filter(|(_, gap)| *gap <= range)
            .min_by_key(|(_, gap)| *gap)
            .map(|(id, _)| id)
    }

    /// Drops flagged raiders, first returning any loot they still carry.
    ///
    /// Returns the number of raiders removed.
    pub fn cleanup(&mut self, inventory: &mut Inventory) -> usize {
        let before = self.raiders.len();
        for raider in &mut self.raiders {
            if raider.is_marked_for_removal() {
                raider.recover_loot(inventory);
            }
        }
        self.raiders
            .retain(|raider| !raider.is_marked_for_removal());
        let removed = before - self.raiders.len();
        if removed > 0 {
            debug!(removed, remaining = self.raiders.len(), "raiders_cleaned_up");
        }
        removed
    }

    /// Cleans up, then ticks every remaining raider.
    pub fn tick(&mut self, ctx: &mut RaidContext<'_>) -> Result<(), SpriteError> {
        let _ = self.cleanup(ctx.inventory);
        for raider in &mut self.raiders {
            raider.tick(ctx)?;
        }
        Ok(())
    }

    /// Drawables for every live raider in insertion order.
    #[must_use]
    pub fn render(&self) -> Vec<Visual> {
        self.raiders
            .iter()
            .filter(|raider| !raider.is_marked_for_removal())
            .map(|raider| raider.creature().entity().visual())
            .collect()
    }
}

/// Every defender currently in the world, guard bees included.
#[derive(Debug, Default)]
pub struct CreatureCollection {
    members: Vec<Box<dyn Defender>>,
}

impl CreatureCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a defender.
    pub fn add(&mut self, defender: Box<dyn Defender>) {
        self.members.push(defender);
    }

    /// Number of defenders held, flagged ones included until the next cleanup.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the collection holds no defenders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Defenders in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Defender> {
        self.members
            .iter()
            .map(|defender| -> &dyn Defender { &**defender })
    }

    /// Defenders of one kind in insertion order.
    pub fn of_kind(&self, kind: DefenderKind) -> impl Iterator<Item = &dyn Defender> {
        self.iter().filter(move |defender| defender.kind() == kind)
    }

    /// Drops flagged defenders and reports how many were removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.members.len();
        self.members
            .retain(|defender| !defender.creature().entity().is_marked_for_removal());
        before - self.members.len()
    }

    /// Cleans up, then ticks every remaining defender.
    ///
    /// Defenders released during the pass join the collection afterwards.
    pub fn tick(
        &mut self,
        raiders: &mut RaiderCollection,
        dimensions: Dimensions,
    ) -> Result<(), SpriteError> {
        let _ = self.cleanup();
        let mut ctx = DefenderContext::new(raiders, dimensions);
        for defender in &mut self.members {
            defender.tick(&mut ctx)?;
        }
        self.members.extend(ctx.into_launched());
        Ok(())
    }

    /// Lets every interactable defender react to the raiders.
    ///
    /// Defenders released during the pass join the collection afterwards, so
    /// they neither act nor get walked over in the pass that created them.
    pub fn interact(
        &mut self,
        raiders: &mut RaiderCollection,
        dimensions: Dimensions,
    ) -> Result<(), SpriteError> {
        let mut ctx = DefenderContext::new(raiders, dimensions);
        for defender in &mut self.members {
            if defender.creature().entity().is_marked_for_removal() {
                continue;
            }
            if let Some(interactable) = defender.as_interactable() {
                interactable.interact(&mut ctx)?;
            }
        }
        self.members.extend(ctx.into_launched());
        Ok(())
    }

    /// Drawables for every live defender in insertion order.
    #[must_use]
    pub fn render(&self) -> Vec<Visual> {
        self.members
            .iter()
            .map(|defender| defender.creature().entity())
            .filter(|entity| !entity.is_marked_for_removal())
            .map(|entity| entity.visual())
            .collect()
    }
}
