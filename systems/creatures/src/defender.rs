//! Player-built defenders and the guard bees they release.

use std::fmt;

use farm_raid_core::{
    distance, Dimensions, Heading, IVec2, SpriteError, SpriteGroup, Timer,
};
use tracing::debug;

use crate::{Creature, RaiderCollection, RaiderId};

/// Art set used by scarecrows.
pub const SCARECROW_ART: SpriteGroup = SpriteGroup::new("scarecrow", &["default"]);
/// Art set used by hives.
pub const HIVE_ART: SpriteGroup = SpriteGroup::new("hive", &["default", "empty"]);
/// Art set used by guard bees.
pub const GUARD_BEE_ART: SpriteGroup = SpriteGroup::new("guard_bee", &["up", "down"]);

/// Scare radius of a scarecrow, in tiles.
pub const SCARECROW_RADIUS_TILES: i32 = 4;
/// Detection range of a hive, in tiles.
pub const HIVE_RANGE_TILES: i32 = 5;
/// Ticks a hive needs to reload after releasing a bee.
pub const HIVE_RELOAD_TICKS: u32 = 120;
/// Pixels per tick travelled by a guard bee.
pub const GUARD_BEE_SPEED: i32 = 6;
/// Ticks before an unsuccessful guard bee expires.
pub const GUARD_BEE_LIFESPAN: u32 = 300;

/// Tag identifying the kind of a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefenderKind {
    /// Stationary defender that frightens raiders away.
    Scarecrow,
    /// Stationary defender that releases guard bees.
    Hive,
    /// Mobile defender that destroys the raider it chases.
    GuardBee,
}

/// Shared state defenders read and mutate while ticking or interacting.
///
/// Defenders released during a pass are queued here and only join the
/// owning collection once the pass is over.
#[derive(Debug)]
pub struct DefenderContext<'a> {
    raiders: &'a mut RaiderCollection,
    dimensions: Dimensions,
    launched: Vec<Box<dyn Defender>>,
}

impl<'a> DefenderContext<'a> {
    /// Creates a context over the provided raiders.
    #[must_use]
    pub fn new(raiders: &'a mut RaiderCollection, dimensions: Dimensions) -> Self {
        Self {
            raiders,
            dimensions,
            launched: Vec::new(),
        }
    }

    /// Raiders the defenders act on.
    pub fn raiders(&mut self) -> &mut RaiderCollection {
        self.raiders
    }

    /// Fixed world dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Queues a defender to join the collection after the current pass.
    pub fn launch(&mut self, defender: Box<dyn Defender>) {
        self.launched.push(defender);
    }

    /// Defenders queued during the pass.
    #[must_use]
    pub fn into_launched(self) -> Vec<Box<dyn Defender>> {
        self.launched
    }
}

/// Behaviour shared by every defender.
pub trait Defender: fmt::Debug {
    /// Kind tag of the defender.
    fn kind(&self) -> DefenderKind;

    /// Movable state of the defender.
    fn creature(&self) -> &Creature;

    /// Mutable movable state of the defender.
    fn creature_mut(&mut self) -> &mut Creature;

    /// Advances the defender by one tick.
    fn tick(&mut self, ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError>;

    /// Interaction capability, when the defender reacts to nearby raiders.
    fn as_interactable(&mut self) -> Option<&mut dyn DefenderInteraction> {
        None
    }
}

/// Capability of reacting to raiders during the interaction pass.
pub trait DefenderInteraction {
    /// Reacts to the raiders in `ctx`.
    fn interact(&mut self, ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError>;
}

/// Stationary defender that sends nearby raiders fleeing.
#[derive(Clone, Debug, PartialEq)]
pub struct Scarecrow {
    creature: Creature,
}

impl Scarecrow {
    /// Builds a scarecrow at `position`.
    #[must_use]
    pub fn new(position: IVec2) -> Self {
        Self {
            creature: Creature::new(position, SCARECROW_ART.default_sprite(), 0),
        }
    }
}

impl Defender for Scarecrow {
    fn kind(&self) -> DefenderKind {
        DefenderKind::Scarecrow
    }

    fn creature(&self) -> &Creature {
        &self.creature
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    fn tick(&mut self, _ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError> {
        Ok(())
    }

    fn as_interactable(&mut self) -> Option<&mut dyn DefenderInteraction> {
        Some(self)
    }
}

impl DefenderInteraction for Scarecrow {
    fn interact(&mut self, ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError> {
        let radius = ctx.dimensions().tile_size() * SCARECROW_RADIUS_TILES;
        let here = self.creature.position();
        let mut scared = 0_usize;
        for raider in ctx.raiders().iter_mut() {
            if raider.is_marked_for_removal() || distance(here, raider.position()) > radius {
                continue;
            }
            if raider.scare() {
                scared += 1;
            }
        }
        if scared > 0 {
            debug!(x = here.x, y = here.y, scared, "raiders_scared");
        }
        Ok(())
    }
}

/// Stationary defender that releases a guard bee at the nearest raider.
#[derive(Clone, Debug, PartialEq)]
pub struct Hive {
    creature: Creature,
    reload: Timer,
    loaded: bool,
}

impl Hive {
    /// Builds a loaded hive at `position`.
    #[must_use]
    pub fn new(position: IVec2) -> Self {
        Self {
            creature: Creature::new(position, HIVE_ART.default_sprite(), 0),
            reload: Timer::fixed(HIVE_RELOAD_TICKS),
            loaded: true,
        }
    }

    /// Whether a bee is ready to be released.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}

impl Defender for Hive {
    fn kind(&self) -> DefenderKind {
        DefenderKind::Hive
    }

    fn creature(&self) -> &Creature {
        &self.creature
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    fn tick(&mut self, _ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError> {
        if self.loaded {
            return Ok(());
        }
        if self.reload.advance() {
            self.loaded = true;
            self.creature
                .entity_mut()
                .set_sprite(HIVE_ART.sprite("default")?);
        }
        Ok(())
    }

    fn as_interactable(&mut self) -> Option<&mut dyn DefenderInteraction> {
        Some(self)
    }
}

impl DefenderInteraction for Hive {
    fn interact(&mut self, ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError> {
        if !self.loaded {
            return Ok(());
        }
        let here = self.creature.position();
        let range = ctx.dimensions().tile_size() * HIVE_RANGE_TILES;
        let Some(target) = ctx.raiders().nearest_within(here, range) else {
            return Ok(());
        };

        let empty = HIVE_ART.sprite("empty")?;
        self.creature.entity_mut().set_sprite(empty);
        self.loaded = false;
        self.reload.restart();
        ctx.launch(Box::new(GuardBee::new(here, target)));
        debug!(x = here.x, y = here.y, target = target.get(), "guard_bee_released");
        Ok(())
    }
}

/// Mobile defender that chases one raider and dies with it.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardBee {
    creature: Creature,
    lifespan: Timer,
    target: RaiderId,
    home: IVec2,
}

impl GuardBee {
    /// Releases a bee at `home` chasing `target`.
    #[must_use]
    pub fn new(home: IVec2, target: RaiderId) -> Self {
        Self {
            creature: Creature::new(home, GUARD_BEE_ART.default_sprite(), GUARD_BEE_SPEED),
            lifespan: Timer::fixed(GUARD_BEE_LIFESPAN),
            target,
            home,
        }
    }

    /// Raider the bee was released at.
    #[must_use]
    pub const fn target(&self) -> RaiderId {
        self.target
    }

    /// Point the bee was released from.
    #[must_use]
    pub const fn home(&self) -> IVec2 {
        self.home
    }

    fn turn_towards(&mut self, point: IVec2) -> Result<(), SpriteError> {
        self.creature.face(point);
        let heading = Heading::vertical(self.creature.position(), point);
        let sprite = GUARD_BEE_ART.sprite(heading.sprite_name())?;
        self.creature.entity_mut().set_sprite(sprite);
        Ok(())
    }
}

impl Defender for GuardBee {
    fn kind(&self) -> DefenderKind {
        DefenderKind::GuardBee
    }

    fn creature(&self) -> &Creature {
        &self.creature
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    fn tick(&mut self, ctx: &mut DefenderContext<'_>) -> Result<(), SpriteError> {
        if self.creature.entity().is_marked_for_removal() {
            return Ok(());
        }
        if self.lifespan.advance() {
            self.creature.entity_mut().mark_for_removal();
            return Ok(());
        }

        let reach = ctx.dimensions().tile_size();
        let quarry = ctx
            .raiders()
            .get(self.target)
            .filter(|raider| !raider.is_marked_for_removal())
            .map(|raider| raider.position());

        let Some(quarry) = quarry else {
            self.turn_towards(self.home)?;
            if self.creature.distance_from(self.home) < reach {
                self.creature.entity_mut().mark_for_removal();
            } else {
                self.creature.move_forward();
            }
            return Ok(());
        };

        self.turn_towards(quarry)?;
        if self.creature.distance_from(quarry) >= reach {
            self.creature.move_forward();
        }
        if self.creature.distance_from(quarry) < reach {
            self.creature.entity_mut().mark_for_removal();
            if let Some(raider) = ctx.raiders().get_mut(self.target) {
                raider.mark_for_removal();
            }
            debug!(target = self.target.get(), "raider_stung");
        }
        Ok(())
    }
}
