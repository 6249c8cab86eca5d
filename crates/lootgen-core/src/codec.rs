//! JSON codec for loot tables.
//!
//! Deserialization runs in two steps, the way behavior-pack data is loaded:
//! serde decodes the structural file shape (`*Data` types), then a resolve
//! step consults the condition/function registries and a [`TableResolver`]
//! to build the runtime graph. Serialization is the structural inverse and
//! omits default values to keep output compact; both the compact and the
//! explicit forms are accepted on read.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::condition::{ConditionRegistry, LootCondition};
use crate::entry::{EntryKind, LootEntry};
use crate::error::LootError;
use crate::function::{EntryFunction, FunctionKind, FunctionRegistry};
use crate::pool::{LootPool, WeightedPool};
use crate::table::{normalize_table_name, LootTable, TableResolver};

/// Raw file shape of a loot table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LootTableData {
    #[serde(default)]
    pub pools: Vec<LootPoolData>,
}

/// Raw file shape of a pool. `tiers` switches the pool to the tiered
/// strategy; otherwise `rolls` (or the legacy split keys) applies.
#[derive(Debug, Clone, Deserialize)]
pub struct LootPoolData {
    #[serde(default)]
    pub rolls: Option<RollsData>,
    /// Legacy shape: rolls written as two separate keys. Read-only.
    #[serde(default)]
    pub min_rolls: Option<u32>,
    #[serde(default)]
    pub max_rolls: Option<u32>,
    #[serde(default)]
    pub tiers: Option<TiersData>,
    #[serde(default)]
    pub entries: Vec<LootEntryData>,
    #[serde(default)]
    pub conditions: Vec<Map<String, Value>>,
}

/// A roll count: either a bare number or a `{min, max}` object.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RollsData {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TiersData {
    pub initial_range: u32,
    #[serde(default)]
    pub bonus_rolls: u32,
    #[serde(default)]
    pub bonus_chance: f32,
}

/// Raw file shape of an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct LootEntryData {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default = "default_quality")]
    pub quality: i32,
    #[serde(default)]
    pub functions: Vec<Map<String, Value>>,
    #[serde(default)]
    pub conditions: Vec<Map<String, Value>>,
    #[serde(default)]
    pub pools: Vec<LootPoolData>,
}

fn default_weight() -> u32 {
    1
}

fn default_quality() -> i32 {
    1
}

/// Converts between the JSON schema and the runtime loot graph, using the
/// registries for condition/function variants.
pub struct LootCodec<'a> {
    conditions: &'a ConditionRegistry,
    functions: &'a FunctionRegistry,
}

impl<'a> LootCodec<'a> {
    pub fn new(conditions: &'a ConditionRegistry, functions: &'a FunctionRegistry) -> Self {
        Self {
            conditions,
            functions,
        }
    }

    /// Parses and resolves a loot table from a JSON string.
    pub fn decode_str(
        &self,
        json: &str,
        resolver: &mut dyn TableResolver,
    ) -> Result<LootTable, LootError> {
        let data: LootTableData =
            serde_json::from_str(json).map_err(|e| LootError::Malformed(e.to_string()))?;
        self.decode_table(&data, resolver)
    }

    pub fn decode_table(
        &self,
        data: &LootTableData,
        resolver: &mut dyn TableResolver,
    ) -> Result<LootTable, LootError> {
        let mut pools = Vec::with_capacity(data.pools.len());
        for (i, pool) in data.pools.iter().enumerate() {
            pools.push(
                self.decode_pool(pool, resolver)
                    .map_err(|e| e.at(&format!("pools[{i}]")))?,
            );
        }
        Ok(LootTable::new(pools))
    }

    fn decode_pool(
        &self,
        data: &LootPoolData,
        resolver: &mut dyn TableResolver,
    ) -> Result<LootPool, LootError> {
        let mut entries = Vec::with_capacity(data.entries.len());
        for (i, entry) in data.entries.iter().enumerate() {
            entries.push(
                self.decode_entry(entry, resolver)
                    .map_err(|e| e.at(&format!("entries[{i}]")))?,
            );
        }
        let conditions = self.decode_conditions(&data.conditions)?;

        if let Some(tiers) = &data.tiers {
            return LootPool::tiered(
                entries,
                tiers.initial_range,
                tiers.bonus_rolls,
                tiers.bonus_chance,
                conditions,
            );
        }

        let (min_rolls, max_rolls) = match data.rolls {
            Some(RollsData::Fixed(n)) => (n, n),
            Some(RollsData::Range { min, max }) => (min, max),
            None if data.min_rolls.is_some() || data.max_rolls.is_some() => {
                let min = data.min_rolls.unwrap_or(1);
                (min, data.max_rolls.unwrap_or(min))
            }
            None => (1, 1),
        };
        LootPool::weighted(entries, min_rolls, max_rolls, conditions)
    }

    fn decode_entry(
        &self,
        data: &LootEntryData,
        resolver: &mut dyn TableResolver,
    ) -> Result<LootEntry, LootError> {
        let kind = match data.entry_type.as_str() {
            "item" => EntryKind::Item {
                name: data
                    .name
                    .clone()
                    .ok_or_else(|| LootError::MissingField("name".to_string()))?,
            },
            "loot_table" => {
                let name = data
                    .name
                    .as_deref()
                    .ok_or_else(|| LootError::MissingField("name".to_string()))?;
                let key = normalize_table_name(name);
                let table = resolver.resolve(&key)?;
                EntryKind::Table { name: key, table }
            }
            "empty" => EntryKind::Empty,
            other => return Err(LootError::UnknownEntryType(other.to_string())),
        };

        let mut functions = Vec::with_capacity(data.functions.len());
        for (i, function) in data.functions.iter().enumerate() {
            functions.push(
                self.decode_function(function)
                    .map_err(|e| e.at(&format!("functions[{i}]")))?,
            );
        }
        let conditions = self.decode_conditions(&data.conditions)?;

        let mut pools = Vec::with_capacity(data.pools.len());
        for (i, pool) in data.pools.iter().enumerate() {
            pools.push(
                self.decode_pool(pool, resolver)
                    .map_err(|e| e.at(&format!("pools[{i}]")))?,
            );
        }

        LootEntry::new(kind, data.weight, data.quality, functions, conditions, pools)
    }

    fn decode_conditions(
        &self,
        data: &[Map<String, Value>],
    ) -> Result<Vec<LootCondition>, LootError> {
        let mut conditions = Vec::with_capacity(data.len());
        for (i, condition) in data.iter().enumerate() {
            conditions.push(
                self.decode_condition(condition)
                    .map_err(|e| e.at(&format!("conditions[{i}]")))?,
            );
        }
        Ok(conditions)
    }

    fn decode_condition(&self, data: &Map<String, Value>) -> Result<LootCondition, LootError> {
        let name = data
            .get("condition")
            .ok_or_else(|| LootError::MissingField("condition".to_string()))?
            .as_str()
            .ok_or(LootError::InvalidField {
                field: "condition".to_string(),
                expected: "a string",
            })?;
        let mut fields = data.clone();
        fields.remove("condition");
        self.conditions.create(name, &fields)
    }

    fn decode_function(&self, data: &Map<String, Value>) -> Result<EntryFunction, LootError> {
        let name = data
            .get("function")
            .ok_or_else(|| LootError::MissingField("function".to_string()))?
            .as_str()
            .ok_or(LootError::InvalidField {
                field: "function".to_string(),
                expected: "a string",
            })?;

        let conditions = match data.get("conditions") {
            None => Vec::new(),
            Some(Value::Array(list)) => {
                let mut maps = Vec::with_capacity(list.len());
                for value in list {
                    maps.push(
                        value
                            .as_object()
                            .ok_or(LootError::InvalidField {
                                field: "conditions".to_string(),
                                expected: "a list of condition objects",
                            })?
                            .clone(),
                    );
                }
                self.decode_conditions(&maps)?
            }
            Some(_) => {
                return Err(LootError::InvalidField {
                    field: "conditions".to_string(),
                    expected: "a list of condition objects",
                })
            }
        };

        let mut fields = data.clone();
        fields.remove("function");
        fields.remove("conditions");
        let kind = self.functions.create(name, &fields)?;
        Ok(EntryFunction::new(kind, conditions))
    }

    /// Serializes a table to its canonical JSON value. Serializing the same
    /// table twice yields identical output.
    pub fn encode_table(&self, table: &LootTable) -> Result<Value, LootError> {
        let mut data = Map::new();
        if !table.pools().is_empty() {
            let mut pools = Vec::with_capacity(table.pools().len());
            for pool in table.pools() {
                pools.push(self.encode_pool(pool)?);
            }
            data.insert("pools".to_string(), Value::Array(pools));
        }
        Ok(Value::Object(data))
    }

    /// [`encode_table`](Self::encode_table) rendered to a string.
    pub fn encode_string(&self, table: &LootTable) -> Result<String, LootError> {
        let value = self.encode_table(table)?;
        serde_json::to_string_pretty(&value).map_err(|e| LootError::Malformed(e.to_string()))
    }

    fn encode_pool(&self, pool: &LootPool) -> Result<Value, LootError> {
        let mut data = Map::new();

        match pool {
            LootPool::Weighted(weighted) => {
                self.encode_rolls(weighted, &mut data);
            }
            LootPool::Tiered(tiered) => {
                let mut tiers = Map::new();
                tiers.insert(
                    "initial_range".to_string(),
                    Value::from(tiered.initial_range()),
                );
                tiers.insert("bonus_rolls".to_string(), Value::from(tiered.bonus_rolls()));
                tiers.insert(
                    "bonus_chance".to_string(),
                    Value::from(f64::from(tiered.bonus_chance())),
                );
                data.insert("tiers".to_string(), Value::Object(tiers));
            }
        }

        if !pool.entries().is_empty() {
            let mut entries = Vec::with_capacity(pool.entries().len());
            for entry in pool.entries() {
                entries.push(self.encode_entry(entry)?);
            }
            data.insert("entries".to_string(), Value::Array(entries));
        }
        self.encode_condition_list(pool.conditions(), &mut data)?;

        Ok(Value::Object(data))
    }

    fn encode_rolls(&self, pool: &WeightedPool, data: &mut Map<String, Value>) {
        let (min, max) = (pool.min_rolls(), pool.max_rolls());
        if (min, max) == (1, 1) {
            return;
        }
        let rolls = if min == max {
            Value::from(min)
        } else {
            let mut range = Map::new();
            range.insert("min".to_string(), Value::from(min));
            range.insert("max".to_string(), Value::from(max));
            Value::Object(range)
        };
        data.insert("rolls".to_string(), rolls);
    }

    fn encode_entry(&self, entry: &LootEntry) -> Result<Value, LootError> {
        let mut data = Map::new();

        let (type_name, name) = match entry.kind() {
            EntryKind::Item { name } => ("item", Some(name)),
            EntryKind::Table { name, .. } => ("loot_table", Some(name)),
            EntryKind::Empty => ("empty", None),
        };
        data.insert("type".to_string(), Value::from(type_name));
        if let Some(name) = name {
            data.insert("name".to_string(), Value::from(name.as_str()));
        }
        if entry.weight() != 1 {
            data.insert("weight".to_string(), Value::from(entry.weight()));
        }
        if entry.quality() != 1 {
            data.insert("quality".to_string(), Value::from(entry.quality()));
        }

        if !entry.functions().is_empty() {
            let mut functions = Vec::with_capacity(entry.functions().len());
            for function in entry.functions() {
                functions.push(self.encode_function(function)?);
            }
            data.insert("functions".to_string(), Value::Array(functions));
        }
        self.encode_condition_list(entry.conditions(), &mut data)?;
        if !entry.pools().is_empty() {
            let mut pools = Vec::with_capacity(entry.pools().len());
            for pool in entry.pools() {
                pools.push(self.encode_pool(pool)?);
            }
            data.insert("pools".to_string(), Value::Array(pools));
        }

        Ok(Value::Object(data))
    }

    fn encode_condition_list(
        &self,
        conditions: &[LootCondition],
        data: &mut Map<String, Value>,
    ) -> Result<(), LootError> {
        if conditions.is_empty() {
            return Ok(());
        }
        let mut encoded = Vec::with_capacity(conditions.len());
        for condition in conditions {
            encoded.push(self.encode_condition(condition)?);
        }
        data.insert("conditions".to_string(), Value::Array(encoded));
        Ok(())
    }

    fn encode_condition(&self, condition: &LootCondition) -> Result<Value, LootError> {
        let mut data = Map::new();
        data.insert(
            "condition".to_string(),
            Value::from(self.conditions.save_id(condition.tag())?),
        );
        match condition {
            LootCondition::RandomChance { chance } => {
                data.insert("chance".to_string(), Value::from(f64::from(*chance)));
            }
            LootCondition::RandomDifficultyChance {
                per_difficulty,
                default_chance,
            } => {
                data.insert(
                    "default_chance".to_string(),
                    Value::from(f64::from(*default_chance)),
                );
                for (difficulty, chance) in per_difficulty {
                    data.insert(difficulty.key().to_string(), Value::from(f64::from(*chance)));
                }
            }
            LootCondition::Custom(custom) => {
                data.extend(custom.fields());
            }
            LootCondition::KilledByPlayer | LootCondition::KilledByPlayerOrPets => {}
        }
        Ok(Value::Object(data))
    }

    fn encode_function(&self, function: &EntryFunction) -> Result<Value, LootError> {
        let mut data = Map::new();
        data.insert(
            "function".to_string(),
            Value::from(self.functions.save_id(function.kind().tag())?),
        );
        match function.kind() {
            FunctionKind::EnchantRandomly { treasure } => {
                if *treasure {
                    data.insert("treasure".to_string(), Value::from(true));
                }
            }
            FunctionKind::RandomDye => {}
            FunctionKind::SetCount { min, max } => {
                data.insert("count".to_string(), encode_int_range(*min, *max));
            }
            FunctionKind::SetName { name } => {
                data.insert("name".to_string(), Value::from(name.as_str()));
            }
            FunctionKind::SetDamage { min, max } => {
                data.insert("damage".to_string(), encode_float_range(*min, *max));
            }
            FunctionKind::SetData { min, max } => {
                data.insert("data".to_string(), encode_int_range(*min, *max));
            }
            FunctionKind::SetStewEffect { effects } => {
                let list = effects
                    .iter()
                    .map(|id| {
                        let mut effect = Map::new();
                        effect.insert("id".to_string(), Value::from(id.as_str()));
                        Value::Object(effect)
                    })
                    .collect();
                data.insert("effects".to_string(), Value::Array(list));
            }
            FunctionKind::Custom(custom) => {
                data.extend(custom.fields());
            }
        }
        self.encode_condition_list(function.conditions(), &mut data)?;
        Ok(Value::Object(data))
    }
}

fn encode_int_range(min: u32, max: u32) -> Value {
    if min == max {
        Value::from(min)
    } else {
        let mut range = Map::new();
        range.insert("min".to_string(), Value::from(min));
        range.insert("max".to_string(), Value::from(max));
        Value::Object(range)
    }
}

fn encode_float_range(min: f32, max: f32) -> Value {
    if min == max {
        Value::from(f64::from(min))
    } else {
        let mut range = Map::new();
        range.insert("min".to_string(), Value::from(f64::from(min)));
        range.insert("max".to_string(), Value::from(f64::from(max)));
        Value::Object(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{LootOrigin, WorldView};
    use crate::item::{ItemInfo, ItemStack, SimpleItemCatalog};
    use crate::random::RngSource;
    use crate::table::LootTableRegistry;
    use crate::context::LootContext;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn codec_regs() -> (ConditionRegistry, FunctionRegistry) {
        (ConditionRegistry::vanilla(), FunctionRegistry::vanilla())
    }

    fn decode(json: &str) -> Result<LootTable, LootError> {
        let (conditions, functions) = codec_regs();
        let codec = LootCodec::new(&conditions, &functions);
        let mut registry = LootTableRegistry::new();
        codec.decode_str(json, &mut registry)
    }

    fn catalog() -> SimpleItemCatalog {
        let mut catalog = SimpleItemCatalog::new();
        for name in ["minecraft:apple", "minecraft:bread", "minecraft:bone"] {
            catalog.insert(ItemInfo::new(name, 64));
        }
        catalog
    }

    fn generate_seeded(table: &LootTable, seed: u64) -> Vec<ItemStack> {
        let catalog = catalog();
        let mut rng = RngSource(StdRng::seed_from_u64(seed));
        let mut ctx = LootContext::new(
            WorldView::new(crate::context::Difficulty::Normal),
            LootOrigin::Unknown,
            &catalog,
            &mut rng,
        );
        table.generate(&mut ctx)
    }

    #[test]
    fn compact_form_fills_defaults() {
        let table = decode(
            r#"{
                "pools": [
                    { "entries": [ { "type": "item", "name": "minecraft:apple" } ] }
                ]
            }"#,
        )
        .unwrap();
        let LootPool::Weighted(pool) = &table.pools()[0] else {
            panic!("expected weighted pool");
        };
        assert_eq!((pool.min_rolls(), pool.max_rolls()), (1, 1));
        assert_eq!(table.pools()[0].entries()[0].weight(), 1);
        assert_eq!(table.pools()[0].entries()[0].quality(), 1);
    }

    #[test]
    fn rolls_accepts_number_and_range() {
        let fixed = decode(
            r#"{ "pools": [ { "rolls": 3, "entries": [ { "type": "empty" } ] } ] }"#,
        )
        .unwrap();
        let LootPool::Weighted(pool) = &fixed.pools()[0] else {
            panic!();
        };
        assert_eq!((pool.min_rolls(), pool.max_rolls()), (3, 3));

        let range = decode(
            r#"{ "pools": [ { "rolls": { "min": 1, "max": 4 }, "entries": [ { "type": "empty" } ] } ] }"#,
        )
        .unwrap();
        let LootPool::Weighted(pool) = &range.pools()[0] else {
            panic!();
        };
        assert_eq!((pool.min_rolls(), pool.max_rolls()), (1, 4));
    }

    #[test]
    fn legacy_split_roll_keys_decode() {
        let table = decode(
            r#"{ "pools": [ { "min_rolls": 2, "max_rolls": 5, "entries": [ { "type": "empty" } ] } ] }"#,
        )
        .unwrap();
        let LootPool::Weighted(pool) = &table.pools()[0] else {
            panic!();
        };
        assert_eq!((pool.min_rolls(), pool.max_rolls()), (2, 5));
    }

    #[test]
    fn item_entry_requires_name_with_path() {
        let err = decode(r#"{ "pools": [ { "entries": [ { "type": "item" } ] } ] }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "pools[0].entries[0]: expected key \"name\""
        );
    }

    #[test]
    fn unknown_entry_type_is_rejected() {
        let err =
            decode(r#"{ "pools": [ { "entries": [ { "type": "group" } ] } ] }"#).unwrap_err();
        assert!(matches!(
            err,
            LootError::Context { source, .. } if matches!(*source, LootError::UnknownEntryType(_))
        ));
    }

    #[test]
    fn unknown_condition_is_rejected_by_name() {
        let err = decode(
            r#"{
                "pools": [ {
                    "entries": [ { "type": "empty" } ],
                    "conditions": [ { "condition": "phase_of_the_moon" } ]
                } ]
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("phase_of_the_moon"));
    }

    #[test]
    fn tiered_pool_decodes_from_tiers_object() {
        let table = decode(
            r#"{
                "pools": [ {
                    "tiers": { "initial_range": 2, "bonus_rolls": 1, "bonus_chance": 0.5 },
                    "entries": [
                        { "type": "item", "name": "minecraft:apple" },
                        { "type": "item", "name": "minecraft:bread" }
                    ]
                } ]
            }"#,
        )
        .unwrap();
        let LootPool::Tiered(pool) = &table.pools()[0] else {
            panic!("expected tiered pool");
        };
        assert_eq!(pool.initial_range(), 2);
        assert_eq!(pool.bonus_rolls(), 1);
        assert_eq!(pool.bonus_chance(), 0.5);
    }

    #[test]
    fn table_reference_resolves_through_registry() {
        let (conditions, functions) = codec_regs();
        let codec = LootCodec::new(&conditions, &functions);
        let mut registry = LootTableRegistry::new();

        let inner = codec
            .decode_str(
                r#"{ "pools": [ { "entries": [ { "type": "item", "name": "minecraft:bone" } ] } ] }"#,
                &mut registry,
            )
            .unwrap();
        registry.register("bones", Arc::new(inner), false).unwrap();

        let outer = codec
            .decode_str(
                r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "bones" } ] } ] }"#,
                &mut registry,
            )
            .unwrap();
        let items = generate_seeded(&outer, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "minecraft:bone");

        let missing = codec.decode_str(
            r#"{ "pools": [ { "entries": [ { "type": "loot_table", "name": "ghosts" } ] } ] }"#,
            &mut registry,
        );
        assert!(missing.is_err());
    }

    #[test]
    fn round_trip_generates_identical_sequences() {
        let json = r#"{
            "pools": [
                {
                    "rolls": { "min": 1, "max": 3 },
                    "entries": [
                        {
                            "type": "item",
                            "name": "minecraft:apple",
                            "weight": 3,
                            "functions": [
                                { "function": "set_count", "count": { "min": 1, "max": 4 } },
                                { "function": "set_name", "name": "Golden Delicious",
                                  "conditions": [ { "condition": "random_chance", "chance": 0.5 } ] }
                            ]
                        },
                        {
                            "type": "item",
                            "name": "minecraft:bread",
                            "conditions": [ { "condition": "random_chance", "chance": 0.75 } ]
                        },
                        { "type": "empty", "weight": 2 }
                    ]
                },
                {
                    "tiers": { "initial_range": 1, "bonus_rolls": 2, "bonus_chance": 0.25 },
                    "entries": [
                        { "type": "item", "name": "minecraft:bone" },
                        { "type": "item", "name": "minecraft:apple" }
                    ]
                }
            ]
        }"#;

        let (conditions, functions) = codec_regs();
        let codec = LootCodec::new(&conditions, &functions);
        let mut registry = LootTableRegistry::new();

        let original = codec.decode_str(json, &mut registry).unwrap();
        let encoded = codec.encode_string(&original).unwrap();
        let reloaded = codec.decode_str(&encoded, &mut registry).unwrap();

        for seed in [0u64, 1, 7, 42, 1337] {
            assert_eq!(
                generate_seeded(&original, seed),
                generate_seeded(&reloaded, seed),
                "seed {seed}"
            );
        }
    }

    #[test]
    fn serializing_twice_is_byte_identical() {
        let json = r#"{
            "pools": [ {
                "rolls": 2,
                "entries": [
                    { "type": "item", "name": "minecraft:apple", "weight": 5,
                      "functions": [ { "function": "set_damage", "damage": { "min": 0.25, "max": 0.5 } } ] }
                ],
                "conditions": [
                    { "condition": "random_difficulty_chance", "default_chance": 0.5, "hard": 1.0 }
                ]
            } ]
        }"#;
        let table = decode(json).unwrap();
        let (conditions, functions) = codec_regs();
        let codec = LootCodec::new(&conditions, &functions);
        let first = codec.encode_string(&table).unwrap();
        let second = codec.encode_string(&table).unwrap();
        assert_eq!(first, second);

        // And re-serializing a reloaded table is idempotent.
        let mut registry = LootTableRegistry::new();
        let reloaded = codec.decode_str(&first, &mut registry).unwrap();
        assert_eq!(codec.encode_string(&reloaded).unwrap(), first);
    }

    #[test]
    fn defaults_are_omitted_from_output() {
        let table = decode(
            r#"{
                "pools": [ {
                    "rolls": 1,
                    "entries": [ { "type": "item", "name": "minecraft:apple", "weight": 1, "quality": 1 } ]
                } ]
            }"#,
        )
        .unwrap();
        let (conditions, functions) = codec_regs();
        let codec = LootCodec::new(&conditions, &functions);
        let value = codec.encode_table(&table).unwrap();

        let pool = &value["pools"][0];
        assert!(pool.get("rolls").is_none());
        let entry = &pool["entries"][0];
        assert!(entry.get("weight").is_none());
        assert!(entry.get("quality").is_none());
    }

    #[test]
    fn nested_entry_pools_decode() {
        let table = decode(
            r#"{
                "pools": [ {
                    "entries": [ {
                        "type": "item",
                        "name": "minecraft:apple",
                        "pools": [ { "entries": [ { "type": "item", "name": "minecraft:bone" } ] } ]
                    } ]
                } ]
            }"#,
        )
        .unwrap();
        let entry = &table.pools()[0].entries()[0];
        assert_eq!(entry.pools().len(), 1);

        let items = generate_seeded(&table, 11);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["minecraft:apple", "minecraft:bone"]);
    }
}
