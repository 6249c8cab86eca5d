//! Loot tables and the name registry that lets entries reference them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::LootContext;
use crate::entry::{EntryKind, LootEntry};
use crate::error::LootError;
use crate::item::ItemStack;
use crate::pool::LootPool;
use crate::registry::normalize_save_name;

/// Logical directory a named table is stored under.
pub const SAVE_DIR: &str = "loot_tables";
/// Extension a named table is stored with.
pub const SAVE_EXTENSION: &str = ".json";

/// An ordered collection of pools. Immutable after construction; any number
/// of concurrent `generate` calls may share one table as long as each call
/// brings its own random source.
#[derive(Debug, Clone, Default)]
pub struct LootTable {
    pools: Vec<LootPool>,
}

impl LootTable {
    pub fn new(pools: Vec<LootPool>) -> Self {
        Self { pools }
    }

    pub fn pools(&self) -> &[LootPool] {
        &self.pools
    }

    /// Concatenates every qualifying pool's output in declaration order.
    /// No deduplication and no stack merging across pools.
    pub fn generate(&self, ctx: &mut LootContext) -> Vec<ItemStack> {
        let mut items = Vec::new();
        for pool in &self.pools {
            items.extend(pool.generate(ctx));
        }
        items
    }
}

/// Normalizes a table lookup name; also accepts a full save path.
pub fn normalize_table_name(input: &str) -> String {
    let name = normalize_save_name(input);
    let name = name.strip_prefix("loot_tables/").unwrap_or(&name);
    name.strip_suffix(".json").unwrap_or(name).to_string()
}

/// Resolves a table reference by name during deserialization.
pub trait TableResolver {
    fn resolve(&mut self, name: &str) -> Result<Arc<LootTable>, LootError>;
}

/// Name-to-table index. Populated once at startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LootTableRegistry {
    tables: HashMap<String, Arc<LootTable>>,
}

impl LootTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under a name. Fails when the name is taken and
    /// `override_existing` is false, or when the table's reference graph
    /// reaches back to the name being registered.
    pub fn register(
        &mut self,
        name: &str,
        table: Arc<LootTable>,
        override_existing: bool,
    ) -> Result<(), LootError> {
        let key = normalize_table_name(name);
        if !override_existing && self.tables.contains_key(&key) {
            return Err(LootError::DuplicateRegistration(key));
        }
        if let Some(path) = find_reference(&table, &key) {
            return Err(LootError::CyclicReference(format!("{key} -> {path}")));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<LootTable>> {
        self.tables.get(&normalize_table_name(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// The save path for a registered table, e.g. `loot_tables/pig.json`.
    pub fn save_name(&self, name: &str) -> Result<String, LootError> {
        let key = normalize_table_name(name);
        if !self.tables.contains_key(&key) {
            return Err(LootError::UnknownTable(key));
        }
        Ok(format!("{SAVE_DIR}/{key}{SAVE_EXTENSION}"))
    }
}

impl TableResolver for LootTableRegistry {
    fn resolve(&mut self, name: &str) -> Result<Arc<LootTable>, LootError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| LootError::UnknownTable(normalize_table_name(name)))
    }
}

/// Walks `table`'s reference graph looking for a reference to `target`,
/// returning the name path when found. Pointer-visited so shared diamonds
/// terminate.
fn find_reference(table: &LootTable, target: &str) -> Option<String> {
    fn walk_entries(
        entries: &[LootEntry],
        target: &str,
        visited: &mut Vec<*const LootTable>,
    ) -> Option<String> {
        for entry in entries {
            if let EntryKind::Table { name, table } = entry.kind() {
                if name == target {
                    return Some(name.clone());
                }
                if let Some(path) = walk(table, target, visited) {
                    return Some(format!("{name} -> {path}"));
                }
            }
            for pool in entry.pools() {
                if let Some(path) = walk_entries(pool.entries(), target, visited) {
                    return Some(path);
                }
            }
        }
        None
    }

    fn walk(
        table: &Arc<LootTable>,
        target: &str,
        visited: &mut Vec<*const LootTable>,
    ) -> Option<String> {
        let ptr = Arc::as_ptr(table);
        if visited.contains(&ptr) {
            return None;
        }
        visited.push(ptr);
        for pool in table.pools() {
            if let Some(path) = walk_entries(pool.entries(), target, visited) {
                return Some(path);
            }
        }
        None
    }

    let mut visited = Vec::new();
    for pool in table.pools() {
        if let Some(path) = walk_entries(pool.entries(), target, &mut visited) {
            return Some(path);
        }
    }
    None
}
