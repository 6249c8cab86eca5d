//! Loot table store — scans a directory and loads every table in it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use lootgen_core::codec::LootCodec;
use lootgen_core::condition::ConditionRegistry;
use lootgen_core::error::LootError;
use lootgen_core::function::FunctionRegistry;
use lootgen_core::table::{
    normalize_table_name, LootTable, LootTableRegistry, TableResolver, SAVE_DIR, SAVE_EXTENSION,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Loot(#[from] LootError),
}

/// The outcome of a directory scan: every table that loaded plus a record
/// of the files that did not. A bad file never aborts the scan.
#[derive(Debug, Default)]
pub struct TableStore {
    registry: LootTableRegistry,
    failures: Vec<(String, StoreError)>,
}

impl TableStore {
    pub fn registry(&self) -> &LootTableRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> LootTableRegistry {
        self.registry
    }

    pub fn get(&self, name: &str) -> Option<&Arc<LootTable>> {
        self.registry.get(name)
    }

    /// Per-file failures from the scan, keyed by table name.
    pub fn failures(&self) -> &[(String, StoreError)] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Loads every `loot_tables/*.json` under `root`. Cross-table references
/// are resolved against the same directory, loading referenced files on
/// demand; reference cycles fail the involved files. A missing directory
/// yields an empty store.
pub fn load_dir(
    root: &Path,
    conditions: &ConditionRegistry,
    functions: &FunctionRegistry,
) -> TableStore {
    let dir = root.join(SAVE_DIR);
    let mut loader = DirLoader {
        dir: dir.clone(),
        conditions,
        functions,
        registry: LootTableRegistry::new(),
        loading: Vec::new(),
    };
    let mut failures = Vec::new();

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(_) => return TableStore::default(),
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().map(|e| e == "json").unwrap_or(false) {
            continue;
        }
        let key = normalize_table_name(&path.file_stem().unwrap_or_default().to_string_lossy());
        if let Err(e) = loader.load(&key) {
            warn!("Failed to load loot table {}: {e}", path.display());
            failures.push((key, e));
        }
    }

    info!("Loaded {} loot table(s) from {}", loader.registry.len(), dir.display());
    TableStore {
        registry: loader.registry,
        failures,
    }
}

/// Writes `table` under `root` as `loot_tables/<name>.json` in canonical
/// form, creating the directory if needed. Returns the written path.
pub fn save_table(
    root: &Path,
    name: &str,
    table: &LootTable,
    conditions: &ConditionRegistry,
    functions: &FunctionRegistry,
) -> Result<PathBuf, StoreError> {
    let codec = LootCodec::new(conditions, functions);
    let json = codec.encode_string(table)?;
    let key = normalize_table_name(name);
    let path = root.join(SAVE_DIR).join(format!("{key}{SAVE_EXTENSION}"));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, json)?;
    Ok(path)
}

/// Resolves table references by loading sibling files, tracking the chain
/// of in-progress loads to reject cycles.
struct DirLoader<'a> {
    dir: PathBuf,
    conditions: &'a ConditionRegistry,
    functions: &'a FunctionRegistry,
    registry: LootTableRegistry,
    loading: Vec<String>,
}

impl DirLoader<'_> {
    fn load(&mut self, name: &str) -> Result<Arc<LootTable>, StoreError> {
        if let Some(table) = self.registry.get(name) {
            return Ok(table.clone());
        }
        if self.loading.iter().any(|pending| pending == name) {
            let mut chain = self.loading.clone();
            chain.push(name.to_string());
            return Err(LootError::CyclicReference(chain.join(" -> ")).into());
        }

        let file = self.dir.join(format!("{name}{SAVE_EXTENSION}"));
        let json = fs::read_to_string(&file)?;

        let conditions = self.conditions;
        let functions = self.functions;
        let codec = LootCodec::new(conditions, functions);
        self.loading.push(name.to_string());
        let decoded = codec.decode_str(&json, self);
        self.loading.pop();

        let table = Arc::new(decoded?);
        self.registry.register(name, table.clone(), false)?;
        Ok(table)
    }
}

impl TableResolver for DirLoader<'_> {
    fn resolve(&mut self, name: &str) -> Result<Arc<LootTable>, LootError> {
        self.load(name).map_err(|e| match e {
            StoreError::Loot(e) => e,
            StoreError::Io(_) => LootError::UnknownTable(name.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lootgen_core::context::{Difficulty, LootContext, LootOrigin, WorldView};
    use lootgen_core::item::{ItemInfo, SimpleItemCatalog};
    use lootgen_core::random::RngSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registries() -> (ConditionRegistry, FunctionRegistry) {
        (ConditionRegistry::vanilla(), FunctionRegistry::vanilla())
    }

    fn write_table(root: &Path, name: &str, json: &str) {
        let dir = root.join(SAVE_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{name}.json")), json).unwrap();
    }

    fn generate_names(table: &LootTable, seed: u64) -> Vec<String> {
        let mut catalog = SimpleItemCatalog::new();
        for name in ["minecraft:apple", "minecraft:bone"] {
            catalog.insert(ItemInfo::new(name, 64));
        }
        let mut rng = RngSource(StdRng::seed_from_u64(seed));
        let mut ctx = LootContext::new(
            WorldView::new(Difficulty::Normal),
            LootOrigin::Unknown,
            &catalog,
            &mut rng,
        );
        table
            .generate(&mut ctx)
            .into_iter()
            .map(|item| item.name)
            .collect()
    }

    #[test]
    fn missing_directory_yields_empty_store() {
        let root = std::env::temp_dir().join("lootgen_store_test_missing");
        let _ = fs::remove_dir_all(&root);
        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        assert!(store.is_empty());
        assert!(store.failures().is_empty());
    }

    #[test]
    fn loads_all_tables_in_directory() {
        let root = std::env::temp_dir().join("lootgen_store_test_scan");
        let _ = fs::remove_dir_all(&root);
        write_table(
            &root,
            "zombie",
            r#"{ "pools": [ { "entries": [ { "type": "item", "name": "minecraft:apple" } ] } ] }"#,
        );
        write_table(
            &root,
            "skeleton",
            r#"{ "pools": [ { "entries": [ { "type": "item", "name": "minecraft:bone" } ] } ] }"#,
        );

        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        assert_eq!(store.len(), 2);
        assert!(store.failures().is_empty());

        let zombie = store.get("zombie").unwrap();
        assert_eq!(generate_names(zombie, 1), vec!["minecraft:apple"]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn cross_references_load_on_demand() {
        let root = std::env::temp_dir().join("lootgen_store_test_refs");
        let _ = fs::remove_dir_all(&root);
        write_table(
            &root,
            "chest",
            r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "bones" } ] } ] }"#,
        );
        write_table(
            &root,
            "bones",
            r#"{ "pools": [ { "entries": [ { "type": "item", "name": "minecraft:bone" } ] } ] }"#,
        );

        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        assert_eq!(store.len(), 2);
        assert!(store.failures().is_empty());

        let chest = store.get("chest").unwrap();
        assert_eq!(generate_names(chest, 5), vec!["minecraft:bone"]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn bad_file_is_recorded_without_aborting_the_scan() {
        let root = std::env::temp_dir().join("lootgen_store_test_bad");
        let _ = fs::remove_dir_all(&root);
        write_table(&root, "broken", "{ not json");
        write_table(
            &root,
            "fine",
            r#"{ "pools": [ { "entries": [ { "type": "item", "name": "minecraft:apple" } ] } ] }"#,
        );

        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        assert_eq!(store.len(), 1);
        assert!(store.get("fine").is_some());
        assert_eq!(store.failures().len(), 1);
        assert_eq!(store.failures()[0].0, "broken");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn reference_cycles_fail_the_involved_files() {
        let root = std::env::temp_dir().join("lootgen_store_test_cycle");
        let _ = fs::remove_dir_all(&root);
        write_table(
            &root,
            "a",
            r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "b" } ] } ] }"#,
        );
        write_table(
            &root,
            "b",
            r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "a" } ] } ] }"#,
        );
        write_table(
            &root,
            "selfish",
            r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "selfish" } ] } ] }"#,
        );

        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        assert!(store.is_empty());
        assert_eq!(store.failures().len(), 3);
        for (_, error) in store.failures() {
            assert!(error.to_string().contains("cyclic"), "{error}");
        }
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn save_then_load_is_byte_identical() {
        let root = std::env::temp_dir().join("lootgen_store_test_save");
        let _ = fs::remove_dir_all(&root);
        write_table(
            &root,
            "drops",
            r#"{
                "pools": [ {
                    "rolls": { "min": 1, "max": 3 },
                    "entries": [
                        { "type": "item", "name": "minecraft:apple", "weight": 3,
                          "functions": [ { "function": "set_count", "count": { "min": 1, "max": 4 } } ] },
                        { "type": "empty" }
                    ],
                    "conditions": [ { "condition": "killed_by_player" } ]
                } ]
            }"#,
        );

        let (conditions, functions) = registries();
        let store = load_dir(&root, &conditions, &functions);
        let table = store.get("drops").unwrap();

        let saved = save_table(&root, "drops", table, &conditions, &functions).unwrap();
        let first = fs::read_to_string(&saved).unwrap();

        let reloaded = load_dir(&root, &conditions, &functions);
        let saved_again = save_table(
            &root,
            "drops",
            reloaded.get("drops").unwrap(),
            &conditions,
            &functions,
        )
        .unwrap();
        assert_eq!(fs::read_to_string(&saved_again).unwrap(), first);
        let _ = fs::remove_dir_all(&root);
    }
}
