#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Creature behaviour for the farm raid simulation.
//!
//! Raiders are birds running a small state machine: they attack their
//! quarry, steal, flee back to their spawn point and are removed either on
//! escape or when something kills them first. Defenders are stationary
//! creatures the player builds; scarecrows frighten raiders off and hives
//! release guard bees that take a raider down with them. Both kinds live in
//! collections that clean up flagged members before anything reads them.

mod collection;
mod creature;
mod defender;
mod raider;

pub use collection::{CreatureCollection, RaiderCollection};
pub use creature::Creature;
pub use defender::{
    Defender, DefenderContext, DefenderInteraction, DefenderKind, GuardBee, Hive, Scarecrow,
    GUARD_BEE_ART, GUARD_BEE_LIFESPAN, GUARD_BEE_SPEED, HIVE_ART, HIVE_RANGE_TILES,
    HIVE_RELOAD_TICKS, SCARECROW_ART, SCARECROW_RADIUS_TILES,
};
pub use raider::{
    profile, Loot, Quarry, RaidContext, Raider, RaiderId, SpeciesProfile, EAGLE_ART, MAGPIE_ART,
    PIGEON_ART,
};
