//! Per-call evaluation context: what triggered generation, where, and with
//! which randomness source.

use crate::item::ItemCatalog;
use crate::random::RandomSource;

/// World difficulty, as consulted by difficulty-gated conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Peaceful,
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Peaceful,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
    ];

    /// The JSON key this difficulty appears under.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Peaceful => "peaceful",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(key: &str) -> Option<Difficulty> {
        Difficulty::ALL.into_iter().find(|d| d.key() == key)
    }
}

/// What killed the entity whose death triggered generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Killer {
    Player,
    /// A tamed animal owned by a player.
    TamedAnimal,
    Other,
}

/// What caused a loot table to be generated. Conditions match only the
/// variants they understand and treat everything else as "not satisfied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootOrigin {
    /// An entity died. `killer` is absent for environmental deaths.
    EntityDeath { killer: Option<Killer> },
    /// A player reeled in a fishing rod.
    Fishing,
    /// A container placed during structure generation is being filled.
    StructureChest,
    /// The engine has no specific knowledge of the trigger.
    Unknown,
}

/// Opaque handle to the actor involved in the trigger, if any. The engine
/// never interprets it; it exists so host-registered conditions can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// The slice of world state the engine reads.
#[derive(Debug, Clone, Copy)]
pub struct WorldView {
    pub difficulty: Difficulty,
}

impl WorldView {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }
}

/// Bundles everything one `generate` call needs. Built by the caller
/// immediately before the call and never retained by the engine; only the
/// random source advances state.
pub struct LootContext<'a> {
    world: WorldView,
    origin: LootOrigin,
    actor: Option<ActorId>,
    items: &'a dyn ItemCatalog,
    rng: &'a mut dyn RandomSource,
}

impl<'a> LootContext<'a> {
    pub fn new(
        world: WorldView,
        origin: LootOrigin,
        items: &'a dyn ItemCatalog,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            world,
            origin,
            actor: None,
            items,
            rng,
        }
    }

    pub fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn world(&self) -> &WorldView {
        &self.world
    }

    pub fn origin(&self) -> &LootOrigin {
        &self.origin
    }

    pub fn actor(&self) -> Option<ActorId> {
        self.actor
    }

    pub fn items(&self) -> &'a dyn ItemCatalog {
        self.items
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng
    }
}
