//! Loot conditions: predicates over the evaluation context that gate pools,
//! entries, and entry functions.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::context::{Difficulty, Killer, LootContext, LootOrigin};
use crate::error::LootError;
use crate::registry::Registry;

/// A condition registered by the host rather than shipped built-in.
pub trait CustomCondition: std::fmt::Debug + Send + Sync {
    /// Stable variant tag, used for canonical save id lookup.
    fn tag(&self) -> &'static str;

    fn evaluate(&self, ctx: &mut LootContext) -> bool;

    /// Extra serialized fields beyond `condition`.
    fn fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// A predicate over the evaluation context. Evaluation is free of side
/// effects apart from advancing the context's random source.
#[derive(Debug, Clone)]
pub enum LootCondition {
    /// The origin is an entity death caused directly by a player.
    KilledByPlayer,
    /// As above, or caused by a player-owned tamed animal.
    KilledByPlayerOrPets,
    /// Passes when a random draw lands at or below `chance`.
    RandomChance { chance: f32 },
    /// Like `RandomChance`, with the chance picked by world difficulty.
    RandomDifficultyChance {
        /// Kept in difficulty declaration order for stable serialization.
        per_difficulty: Vec<(Difficulty, f32)>,
        default_chance: f32,
    },
    Custom(Arc<dyn CustomCondition>),
}

impl LootCondition {
    pub fn random_chance(chance: f32) -> Result<Self, LootError> {
        check_chance("chance", chance)?;
        Ok(LootCondition::RandomChance { chance })
    }

    pub fn random_difficulty_chance(
        chances: Vec<(Difficulty, f32)>,
        default_chance: f32,
    ) -> Result<Self, LootError> {
        check_chance("default_chance", default_chance)?;
        for (difficulty, chance) in &chances {
            check_chance(difficulty.key(), *chance)?;
        }
        let per_difficulty: Vec<(Difficulty, f32)> = Difficulty::ALL
            .into_iter()
            .filter_map(|d| {
                chances
                    .iter()
                    .find(|(cd, _)| *cd == d)
                    .map(|(_, c)| (d, *c))
            })
            .collect();
        Ok(LootCondition::RandomDifficultyChance {
            per_difficulty,
            default_chance,
        })
    }

    /// The variant tag matching the built-in registration.
    pub fn tag(&self) -> &'static str {
        match self {
            LootCondition::KilledByPlayer => "killed_by_player",
            LootCondition::KilledByPlayerOrPets => "killed_by_player_or_pets",
            LootCondition::RandomChance { .. } => "random_chance",
            LootCondition::RandomDifficultyChance { .. } => "random_difficulty_chance",
            LootCondition::Custom(custom) => custom.tag(),
        }
    }

    pub fn evaluate(&self, ctx: &mut LootContext) -> bool {
        match self {
            LootCondition::KilledByPlayer => matches!(
                ctx.origin(),
                LootOrigin::EntityDeath {
                    killer: Some(Killer::Player)
                }
            ),
            LootCondition::KilledByPlayerOrPets => matches!(
                ctx.origin(),
                LootOrigin::EntityDeath {
                    killer: Some(Killer::Player | Killer::TamedAnimal)
                }
            ),
            LootCondition::RandomChance { chance } => ctx.rng().next_float() <= *chance,
            LootCondition::RandomDifficultyChance {
                per_difficulty,
                default_chance,
            } => {
                let difficulty = ctx.world().difficulty;
                let chance = per_difficulty
                    .iter()
                    .find(|(d, _)| *d == difficulty)
                    .map_or(*default_chance, |(_, c)| *c);
                ctx.rng().next_float() <= chance
            }
            LootCondition::Custom(custom) => custom.evaluate(ctx),
        }
    }
}

/// True when every condition passes. An empty list always passes.
pub(crate) fn all_pass(conditions: &[LootCondition], ctx: &mut LootContext) -> bool {
    conditions.iter().all(|c| c.evaluate(ctx))
}

fn check_chance(field: &str, value: f32) -> Result<(), LootError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(LootError::InvalidChance {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn chance_field(fields: &Map<String, Value>, key: &'static str) -> Result<f32, LootError> {
    let value = fields
        .get(key)
        .ok_or_else(|| LootError::MissingField(key.to_string()))?;
    let number = value.as_f64().ok_or(LootError::InvalidField {
        field: key.to_string(),
        expected: "a number",
    })?;
    Ok(number as f32)
}

/// Registry of condition builders keyed by normalized save name.
pub type ConditionRegistry = Registry<LootCondition>;

impl Registry<LootCondition> {
    /// An empty condition registry.
    pub fn empty() -> Self {
        Registry::with_unknown(LootError::UnknownCondition)
    }

    /// A registry pre-populated with the built-in conditions.
    pub fn vanilla() -> Self {
        let mut registry = Self::empty();
        registry
            .register(
                "killed_by_player",
                &["killed_by_player"],
                |_| Ok(LootCondition::KilledByPlayer),
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "killed_by_player_or_pets",
                &["killed_by_player_or_pets", "killed_by_player_or_tamed"],
                |_| Ok(LootCondition::KilledByPlayerOrPets),
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "random_chance",
                &["random_chance"],
                |fields| LootCondition::random_chance(chance_field(fields, "chance")?),
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "random_difficulty_chance",
                &["random_difficulty_chance", "random_chance_by_difficulty"],
                |fields| {
                    let default_chance = chance_field(fields, "default_chance")?;
                    let mut chances = Vec::new();
                    for key in fields.keys() {
                        if let Some(difficulty) = Difficulty::from_key(key) {
                            chances.push((difficulty, chance_field(fields, difficulty.key())?));
                        }
                    }
                    LootCondition::random_difficulty_chance(chances, default_chance)
                },
                false,
            )
            .expect("fresh registry");
        registry
    }
}
