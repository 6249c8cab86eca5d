//! Loot pools: the two selection strategies over a set of entries.

use crate::condition::{all_pass, LootCondition};
use crate::context::LootContext;
use crate::entry::LootEntry;
use crate::error::LootError;
use crate::item::ItemStack;

/// A pool of entries, drawn from by one of two strategies.
#[derive(Debug, Clone)]
pub enum LootPool {
    Weighted(WeightedPool),
    Tiered(TieredPool),
}

impl LootPool {
    /// Convenience constructor for a weighted pool.
    pub fn weighted(
        entries: Vec<LootEntry>,
        min_rolls: u32,
        max_rolls: u32,
        conditions: Vec<LootCondition>,
    ) -> Result<Self, LootError> {
        WeightedPool::new(entries, min_rolls, max_rolls, conditions).map(LootPool::Weighted)
    }

    /// Convenience constructor for a tiered pool.
    pub fn tiered(
        entries: Vec<LootEntry>,
        initial_range: u32,
        bonus_rolls: u32,
        bonus_chance: f32,
        conditions: Vec<LootCondition>,
    ) -> Result<Self, LootError> {
        TieredPool::new(entries, initial_range, bonus_rolls, bonus_chance, conditions)
            .map(LootPool::Tiered)
    }

    pub fn entries(&self) -> &[LootEntry] {
        match self {
            LootPool::Weighted(pool) => &pool.entries,
            LootPool::Tiered(pool) => &pool.entries,
        }
    }

    pub fn conditions(&self) -> &[LootCondition] {
        match self {
            LootPool::Weighted(pool) => &pool.conditions,
            LootPool::Tiered(pool) => &pool.conditions,
        }
    }

    /// Generates this pool's items, checking its own conditions first.
    pub fn generate(&self, ctx: &mut LootContext) -> Vec<ItemStack> {
        match self {
            LootPool::Weighted(pool) => pool.generate(ctx),
            LootPool::Tiered(pool) => pool.generate(ctx),
        }
    }
}

/// Rolls a random number of times; each roll picks one entry with
/// probability proportional to its weight.
#[derive(Debug, Clone)]
pub struct WeightedPool {
    entries: Vec<LootEntry>,
    min_rolls: u32,
    max_rolls: u32,
    conditions: Vec<LootCondition>,
}

impl WeightedPool {
    pub fn new(
        entries: Vec<LootEntry>,
        min_rolls: u32,
        max_rolls: u32,
        conditions: Vec<LootCondition>,
    ) -> Result<Self, LootError> {
        if min_rolls > max_rolls {
            return Err(LootError::InvalidRollBounds {
                min: min_rolls,
                max: max_rolls,
            });
        }
        Ok(Self {
            entries,
            min_rolls,
            max_rolls,
            conditions,
        })
    }

    pub fn min_rolls(&self) -> u32 {
        self.min_rolls
    }

    pub fn max_rolls(&self) -> u32 {
        self.max_rolls
    }

    pub fn generate(&self, ctx: &mut LootContext) -> Vec<ItemStack> {
        if !all_pass(&self.conditions, ctx) || self.entries.is_empty() {
            return Vec::new();
        }

        let rolls = ctx.rng().next_range(self.min_rolls, self.max_rolls);
        if rolls < 1 {
            return Vec::new();
        }

        // Entry conditions are evaluated once per invocation, not once per
        // roll; re-filtering between rolls would break seed reproducibility.
        let qualifying: Vec<&LootEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.qualifies(ctx))
            .collect();
        let total_weight: u32 = qualifying.iter().map(|entry| entry.weight()).sum();
        if total_weight == 0 {
            // No qualifying entries; a draw could never land anywhere.
            return Vec::new();
        }

        let mut items = Vec::new();
        for _ in 0..rolls {
            let selected = ctx.rng().next_range(1, total_weight);
            let mut running = 0;
            for entry in &qualifying {
                running += entry.weight();
                if selected <= running {
                    items.extend(entry.generate(ctx));
                    break;
                }
            }
        }
        items
    }
}

/// Picks a single tier index and returns that one entry's output. Higher
/// tiers are reached through bonus rolls, not weight; per-entry conditions
/// are intentionally ignored by this strategy.
#[derive(Debug, Clone)]
pub struct TieredPool {
    /// Ordered; position is the (1-based) tier.
    entries: Vec<LootEntry>,
    initial_range: u32,
    bonus_rolls: u32,
    bonus_chance: f32,
    conditions: Vec<LootCondition>,
}

impl TieredPool {
    pub fn new(
        entries: Vec<LootEntry>,
        initial_range: u32,
        bonus_rolls: u32,
        bonus_chance: f32,
        conditions: Vec<LootCondition>,
    ) -> Result<Self, LootError> {
        if initial_range < 1 || initial_range as usize > entries.len() {
            return Err(LootError::InvalidTierRange {
                range: initial_range,
                entries: entries.len(),
            });
        }
        if !(0.0..=1.0).contains(&bonus_chance) {
            return Err(LootError::InvalidChance {
                field: "bonus_chance".to_string(),
                value: bonus_chance,
            });
        }
        Ok(Self {
            entries,
            initial_range,
            bonus_rolls,
            bonus_chance,
            conditions,
        })
    }

    pub fn initial_range(&self) -> u32 {
        self.initial_range
    }

    pub fn bonus_rolls(&self) -> u32 {
        self.bonus_rolls
    }

    pub fn bonus_chance(&self) -> f32 {
        self.bonus_chance
    }

    pub fn generate(&self, ctx: &mut LootContext) -> Vec<ItemStack> {
        if !all_pass(&self.conditions, ctx) {
            return Vec::new();
        }

        let mut index = ctx.rng().next_range(1, self.initial_range);
        for _ in 0..self.bonus_rolls {
            if ctx.rng().next_float() <= self.bonus_chance {
                index += 1;
            }
        }

        // Bonuses may push the index past the last tier; that is a valid
        // "no drop" outcome.
        match self.entries.get(index as usize - 1) {
            Some(entry) => entry.generate(ctx),
            None => Vec::new(),
        }
    }
}
