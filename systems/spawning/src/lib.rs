#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timer-gated raider factories.
//!
//! Every spawner owns a repeating timer and creates exactly one raider each
//! time it fires. Spawners with a coin cost only spawn when the cost can be
//! paid, and the payment happens together with the creation.

use farm_raid_core::{Dimensions, IVec2, Inventory, RaiderSpecies, Timer};
use farm_raid_system_creatures::{RaiderCollection, RaiderId};
use farm_raid_world::SpawnerDetail;
use tracing::debug;

/// Factory creating raiders of one species at a fixed point.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    species: RaiderSpecies,
    position: IVec2,
    timer: Timer,
    cost: Option<u32>,
}

impl Spawner {
    /// Creates a spawner firing every `interval` ticks.
    #[must_use]
    pub const fn new(species: RaiderSpecies, position: IVec2, interval: u32) -> Self {
        Self {
            species,
            position,
            timer: Timer::repeating(interval),
            cost: None,
        }
    }

    /// Builds a spawner from a parsed detail record.
    #[must_use]
    pub const fn from_detail(detail: &SpawnerDetail, dimensions: Dimensions) -> Self {
        Self::new(
            detail.species,
            dimensions.cell_to_pixel(detail.column, detail.row),
            detail.interval,
        )
    }

    /// Requires `coins` to be paid for every raider created.
    #[must_use]
    pub fn with_cost(mut self, coins: u32) -> Self {
        self.cost = Some(coins);
        self
    }

    /// Species the spawner creates.
    #[must_use]
    pub const fn species(&self) -> RaiderSpecies {
        self.species
    }

    /// Point new raiders appear at.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Moves the spawn point.
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Coins charged per raider, if any.
    #[must_use]
    pub const fn cost(&self) -> Option<u32> {
        self.cost
    }

    /// Timer pacing the spawner.
    #[must_use]
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Advances the timer and creates a raider when it fires.
    ///
    /// A firing that cannot be paid for is skipped; nothing is charged and
    /// the next attempt happens one interval later.
    pub fn tick(
        &mut self,
        raiders: &mut RaiderCollection,
        inventory: &mut Inventory,
    ) -> Option<RaiderId> {
        if !self.timer.advance() {
            return None;
        }
        if let Some(cost) = self.cost {
            if !inventory.try_spend_coins(cost) {
                debug!(species = %self.species, cost, "spawn_unaffordable");
                return None;
            }
        }

        let id = raiders.spawn(self.species, self.position);
        debug!(
            species = %self.species,
            raider = id.get(),
            x = self.position.x,
            y = self.position.y,
            "raider_spawned"
        );
        Some(id)
    }
}

/// Every spawner in a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnerSet {
    spawners: Vec<Spawner>,
}

impl SpawnerSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one spawner per detail record.
    #[must_use]
    pub fn from_details(details: &[SpawnerDetail], dimensions: Dimensions) -> Self {
        Self {
            spawners: details
                .iter()
                .map(|detail| Spawner::from_detail(detail, dimensions))
                .collect(),
        }
    }

    /// Adds a spawner.
    pub fn add(&mut self, spawner: Spawner) {
        self.spawners.push(spawner);
    }

    /// Number of spawners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spawners.len()
    }

    /// Whether the set holds no spawners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spawners.is_empty()
    }

    /// Spawners in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Spawner> {
        self.spawners.iter()
    }

    /// Ticks every spawner and returns the raiders created.
    pub fn tick(
        &mut self,
        raiders: &mut RaiderCollection,
        inventory: &mut Inventory,
    ) -> Vec<RaiderId> {
        self.spawners
            .iter_mut()
            .filter_map(|spawner| spawner.tick(raiders, inventory))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_still_fires_once_per_tick() {
        let mut spawner = Spawner::new(RaiderSpecies::Magpie, IVec2::ZERO, 0);
        let mut raiders = RaiderCollection::new();
        let mut inventory = Inventory::default();

        for _ in 0..3 {
            assert!(spawner.tick(&mut raiders, &mut inventory).is_some());
        }
        assert_eq!(raiders.len(), 3);
    }
}
