//! Bird raiders: patrol towards their quarry, steal, flee back to where they
//! spawned, and give their loot back if they die before escaping.

use farm_raid_core::{
    distance, Dimensions, Heading, IVec2, Inventory, RaiderSpecies, ResourceKind, SpriteError,
    SpriteGroup, Timer,
};
use farm_raid_world::{World, CABBAGE_FOOD_YIELD};
use tracing::debug;

use crate::Creature;

/// Art set used by magpies.
pub const MAGPIE_ART: SpriteGroup = SpriteGroup::new("magpie", &["down", "up"]);
/// Art set used by eagles.
pub const EAGLE_ART: SpriteGroup = SpriteGroup::new("eagle", &["down", "up", "left", "right"]);
/// Art set used by pigeons.
pub const PIGEON_ART: SpriteGroup = SpriteGroup::new("pigeon", &["down", "up"]);

/// Identifier assigned to a raider by its collection; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaiderId(u64);

impl RaiderId {
    /// Creates a new raider identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// What a species goes after while attacking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quarry {
    /// The player, wherever they currently stand.
    Player,
    /// The nearest tile holding the resource, re-chosen every tick.
    NearestResource(ResourceKind),
}

/// What a species takes once it reaches its quarry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loot {
    /// Up to this many coins from the player's pool.
    Coins(u32),
    /// Up to this many units of food from the player's pool.
    Food(u32),
    /// One cabbage lifted off the targeted tile.
    Cabbage,
}

/// Tuning shared by every raider of one species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeciesProfile {
    /// Art set of the species.
    pub art: SpriteGroup,
    /// Whether the art carries left and right frames.
    pub four_way_art: bool,
    /// Pixels per tick while attacking.
    pub attack_speed: i32,
    /// Pixels per tick while fleeing.
    pub escape_speed: i32,
    /// Ticks before the raider gives up and leaves.
    pub lifespan: u32,
    /// What the raider heads for.
    pub quarry: Quarry,
    /// What the raider steals.
    pub loot: Loot,
}

/// Tuning for the provided species.
#[must_use]
pub const fn profile(species: RaiderSpecies) -> SpeciesProfile {
    match species {
        RaiderSpecies::Magpie => SpeciesProfile {
            art: MAGPIE_ART,
            four_way_art: false,
            attack_speed: 3,
            escape_speed: 5,
            lifespan: 900,
            quarry: Quarry::Player,
            loot: Loot::Coins(1),
        },
        RaiderSpecies::Eagle => SpeciesProfile {
            art: EAGLE_ART,
            four_way_art: true,
            attack_speed: 4,
            escape_speed: 6,
            lifespan: 1200,
            quarry: Quarry::Player,
            loot: Loot::Food(3),
        },
        RaiderSpecies::Pigeon => SpeciesProfile {
            art: PIGEON_ART,
            four_way_art: false,
            attack_speed: 2,
            escape_speed: 4,
            lifespan: 1500,
            quarry: Quarry::NearestResource(ResourceKind::Cabbage),
            loot: Loot::Cabbage,
        },
    }
}

/// Shared state a raider reads and mutates during its tick.
#[derive(Debug)]
pub struct RaidContext<'a> {
    /// Tiles the raider may scan and rob.
    pub world: &'a mut World,
    /// Player resource pools.
    pub inventory: &'a mut Inventory,
    /// Current player position, if the player is present.
    pub player: Option<IVec2>,
    /// Fixed world dimensions.
    pub dimensions: Dimensions,
}

/// Mobile bird that steals from the player and tries to escape with it.
#[derive(Clone, Debug, PartialEq)]
pub struct Raider {
    id: RaiderId,
    species: RaiderSpecies,
    profile: SpeciesProfile,
    creature: Creature,
    lifespan: Timer,
    attacking: bool,
    spawn: IVec2,
    target: Option<IVec2>,
    carried: u32,
    escaped: bool,
}

impl Raider {
    /// Creates an attacking raider at its spawn point.
    ///
    /// The identifier is assigned when the raider joins a collection.
    #[must_use]
    pub fn new(species: RaiderSpecies, spawn: IVec2) -> Self {
        let profile = profile(species);
        Self {
            id: RaiderId::new(0),
            species,
            profile,
            creature: Creature::new(spawn, profile.art.default_sprite(), profile.attack_speed),
            lifespan: Timer::fixed(profile.lifespan),
            attacking: true,
            spawn,
            target: None,
            carried: 0,
            escaped: false,
        }
    }

    /// Identifier assigned by the owning collection.
    #[must_use]
    pub const fn id(&self) -> RaiderId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: RaiderId) {
        self.id = id;
    }

    /// Species of the raider.
    #[must_use]
    pub const fn species(&self) -> RaiderSpecies {
        self.species
    }

    /// Movable state of the raider.
    #[must_use]
    pub const fn creature(&self) -> &Creature {
        &self.creature
    }

    /// Mutable movable state of the raider.
    pub fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    /// Pixel position of the raider.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.creature.position()
    }

    /// Where the raider appeared and where it flees to.
    #[must_use]
    pub const fn spawn(&self) -> IVec2 {
        self.spawn
    }

    /// Point the raider was last heading for while attacking.
    #[must_use]
    pub const fn target(&self) -> Option<IVec2> {
        self.target
    }

    /// Remaining lifetime of the raider.
    #[must_use]
    pub const fn lifespan(&self) -> &Timer {
        &self.lifespan
    }

    /// Whether the raider is still going after its quarry.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Units of loot currently carried.
    #[must_use]
    pub const fn carried(&self) -> u32 {
        self.carried
    }

    /// Whether the raider made it back to its spawn point with loot.
    #[must_use]
    pub const fn has_escaped(&self) -> bool {
        self.escaped
    }

    /// Whether the raider is flagged for removal.
    #[must_use]
    pub const fn is_marked_for_removal(&self) -> bool {
        self.creature.entity().is_marked_for_removal()
    }

    /// Flags the raider for removal, as when a defender catches it.
    pub fn mark_for_removal(&mut self) {
        self.creature.entity_mut().mark_for_removal();
    }

    /// Forces the raider to give up its attack without granting it loot.
    ///
    /// Returns `false` when the raider was already fleeing.
    pub fn scare(&mut self) -> bool {
        if !self.attacking {
            return false;
        }
        self.attacking = false;
        self.creature.set_speed(self.profile.escape_speed);
        true
    }

    /// Returns carried loot to the player unless the raider escaped with it.
    ///
    /// Coins and food go back to the pool they came from. A lifted cabbage is
    /// not replanted; it is converted into its harvest yield of food.
    pub fn recover_loot(&mut self, inventory: &mut Inventory) {
        if self.carried == 0 || self.escaped {
            return;
        }
        match self.profile.loot {
            Loot::Coins(_) => inventory.add_coins(self.carried),
            Loot::Food(_) => inventory.add_food(self.carried),
            Loot::Cabbage => inventory.add_food(self.carried * CABBAGE_FOOD_YIELD),
        }
        debug!(
            raider = self.id.get(),
            species = %self.species,
            recovered = self.carried,
            "loot_recovered"
        );
        self.carried = 0;
    }

    /// Runs one tick of the raid state machine.
    pub fn tick(&mut self, ctx: &mut RaidContext<'_>) -> Result<(), SpriteError> {
        if self.is_marked_for_removal() {
            return Ok(());
        }

        if self.lifespan.advance() {
            self.mark_for_removal();
            self.recover_loot(ctx.inventory);
            return Ok(());
        }

        let tile_size = ctx.dimensions.tile_size();

        if self.attacking {
            match self.acquire_target(ctx) {
                Some(target) => {
                    self.target = Some(target);
                    self.turn_towards(target)?;
                    if self.creature.distance_from(target) <= tile_size {
                        self.steal(target, ctx);
                    }
                }
                None => {
                    let _ = self.scare();
                }
            }
        }

        if !self.attacking {
            self.turn_towards(self.spawn)?;
            if self.creature.distance_from(self.spawn) <= tile_size {
                self.escaped = self.carried > 0;
                self.mark_for_removal();
                debug!(
                    raider = self.id.get(),
                    species = %self.species,
                    carried = self.carried,
                    "raider_left"
                );
            }
        }

        if !self.is_marked_for_removal() {
            self.creature.move_forward();
        }

        if self.is_marked_for_removal() {
            self.recover_loot(ctx.inventory);
        }
        Ok(())
    }

    fn acquire_target(&self, ctx: &RaidContext<'_>) -> Option<IVec2> {
        match self.profile.quarry {
            Quarry::Player => Some(ctx.player.unwrap_or_else(|| ctx.dimensions.window_center())),
            Quarry::NearestResource(resource) => {
                let here = self.position();
                ctx.world
                    .tile_selector(|tile| tile.holds(resource))
                    .into_iter()
                    .map(|tile| tile.position())
                    .min_by_key(|position| distance(here, *position))
            }
        }
    }

    fn turn_towards(&mut self, target: IVec2) -> Result<(), SpriteError> {
        self.creature.face(target);
        let here = self.position();
        let heading = if self.profile.four_way_art {
            Heading::four_way(here, target)
        } else {
            Heading::vertical(here, target)
        };
        let sprite = self.profile.art.sprite(heading.sprite_name())?;
        self.creature.entity_mut().set_sprite(sprite);
        Ok(())
    }

    fn steal(&mut self, target: IVec2, ctx: &mut RaidContext<'_>) {
        let taken = match self.profile.loot {
            Loot::Coins(amount) => ctx.inventory.take_coins(amount),
            Loot::Food(amount) => ctx.inventory.take_food(amount),
            Loot::Cabbage => {
                let lifted = ctx
                    .world
                    .tiles_at_position_mut(target, ctx.dimensions.tile_size())
                    .into_iter()
                    .any(|tile| tile.take_resource(ResourceKind::Cabbage));
                if !lifted {
                    return;
                }
                1
            }
        };

        self.carried = taken;
        self.attacking = false;
        self.creature.set_speed(self.profile.escape_speed);
        debug!(
            raider = self.id.get(),
            species = %self.species,
            taken,
            "loot_stolen"
        );
    }
}
