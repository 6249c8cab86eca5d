//! Loot entries: one weighted branch of a pool.

use std::sync::Arc;

use tracing::debug;

use crate::condition::{all_pass, LootCondition};
use crate::context::LootContext;
use crate::error::LootError;
use crate::function::{EntryFunction, StackSeed};
use crate::item::ItemStack;
use crate::pool::LootPool;
use crate::table::LootTable;

/// What an entry resolves to. The three branches carry disjoint data: an
/// item template (late-bound string id), a reference to another table, or
/// nothing.
#[derive(Debug, Clone)]
pub enum EntryKind {
    Item {
        name: String,
    },
    /// Resolved at deserialize time; the name is retained so serialization
    /// round-trips.
    Table {
        name: String,
        table: Arc<LootTable>,
    },
    Empty,
}

/// One branch of a pool: weighted, gated by conditions, with functions that
/// shape the produced item and sub-pools appended on top of its own result.
#[derive(Debug, Clone)]
pub struct LootEntry {
    kind: EntryKind,
    weight: u32,
    quality: i32,
    functions: Vec<EntryFunction>,
    conditions: Vec<LootCondition>,
    pools: Vec<LootPool>,
}

impl LootEntry {
    pub fn new(
        kind: EntryKind,
        weight: u32,
        quality: i32,
        functions: Vec<EntryFunction>,
        conditions: Vec<LootCondition>,
        pools: Vec<LootPool>,
    ) -> Result<Self, LootError> {
        if weight < 1 {
            return Err(LootError::InvalidWeight);
        }
        Ok(Self {
            kind,
            weight,
            quality,
            functions,
            conditions,
            pools,
        })
    }

    /// A weight-1 item entry with no functions, conditions, or sub-pools.
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Item { name: name.into() },
            weight: 1,
            quality: 1,
            functions: Vec::new(),
            conditions: Vec::new(),
            pools: Vec::new(),
        }
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn functions(&self) -> &[EntryFunction] {
        &self.functions
    }

    pub fn conditions(&self) -> &[LootCondition] {
        &self.conditions
    }

    pub fn pools(&self) -> &[LootPool] {
        &self.pools
    }

    /// Whether this entry participates in a weighted draw.
    pub(crate) fn qualifies(&self, ctx: &mut LootContext) -> bool {
        all_pass(&self.conditions, ctx)
    }

    /// Resolves this entry to zero or more stacks. Sub-pool output is a
    /// fixed addition regardless of what the entry itself produced.
    pub fn generate(&self, ctx: &mut LootContext) -> Vec<ItemStack> {
        let mut items = match &self.kind {
            EntryKind::Empty => Vec::new(),
            // Entry functions apply only to directly materialized items.
            EntryKind::Table { table, .. } => table.generate(ctx),
            EntryKind::Item { name } => self.generate_item(name, ctx),
        };

        for pool in &self.pools {
            items.extend(pool.generate(ctx));
        }

        items
    }

    fn generate_item(&self, name: &str, ctx: &mut LootContext) -> Vec<ItemStack> {
        // Condition gating is decided once and covers both phases.
        let active: Vec<&EntryFunction> = self
            .functions
            .iter()
            .filter(|f| f.qualifies(ctx))
            .collect();

        let mut seed = StackSeed::default();
        for function in &active {
            seed = function.pre_create(ctx, seed);
        }
        if seed.count <= 0 {
            // The documented way for a function to veto an item.
            return Vec::new();
        }

        let Some(info) = ctx.items().lookup(name) else {
            debug!(item = name, "unknown item id, entry yields nothing");
            return Vec::new();
        };
        let fallback_stack_size = info.max_stack_size;

        let mut item = ItemStack::new(name, seed.meta, seed.count as u32);
        for function in &active {
            item = function.on_create(ctx, item);
        }
        if item.count == 0 {
            return Vec::new();
        }

        // Functions may have renamed the item; cap stacks by what it is now.
        let max_stack = ctx
            .items()
            .lookup(&item.name)
            .map_or(fallback_stack_size, |i| i.max_stack_size)
            .max(1) as u32;

        let mut out = Vec::new();
        let mut remaining = item.count;
        while remaining > 0 {
            let count = remaining.min(max_stack);
            let mut stack = item.clone();
            stack.count = count;
            out.push(stack);
            remaining -= count;
        }
        out
    }
}
