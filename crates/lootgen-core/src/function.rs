//! Entry functions: two-phase item mutators attached to loot entries.
//!
//! `pre_create` shapes the variant selector and count before an item is
//! materialized; `on_create` mutates the materialized stack. A function whose
//! own conditions fail is skipped for both phases.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::condition::{all_pass, LootCondition};
use crate::context::LootContext;
use crate::error::LootError;
use crate::item::{EnchantmentInstance, ItemStack, DYE_COLORS, ENCHANTMENT_LIST};
use crate::registry::Registry;

/// The yet-to-be-materialized item: variant selector and quantity, folded
/// through each function's `pre_create` in turn. A final `count <= 0` vetoes
/// the item silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackSeed {
    pub meta: i32,
    pub count: i32,
}

impl Default for StackSeed {
    fn default() -> Self {
        Self { meta: 0, count: 1 }
    }
}

/// An entry function registered by the host rather than shipped built-in.
pub trait CustomFunction: std::fmt::Debug + Send + Sync {
    /// Stable variant tag, used for canonical save id lookup.
    fn tag(&self) -> &'static str;

    fn pre_create(&self, _ctx: &mut LootContext, seed: StackSeed) -> StackSeed {
        seed
    }

    fn on_create(&self, _ctx: &mut LootContext, item: ItemStack) -> ItemStack {
        item
    }

    /// Extra serialized fields beyond `function` and `conditions`.
    fn fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

/// What an entry function does, without its gating conditions.
#[derive(Debug, Clone)]
pub enum FunctionKind {
    /// Adds one random enchantment. Treasure enchantments only participate
    /// when `treasure` is set.
    EnchantRandomly { treasure: bool },
    /// Random armor color; no-op on items the catalog doesn't mark dyeable.
    RandomDye,
    /// Quantity in `[min, max]`.
    SetCount { min: u32, max: u32 },
    /// Custom display name.
    SetName { name: String },
    /// Remaining-durability fraction in `[min, max]`, both within `[0, 1]`.
    /// No-op on items without durability.
    SetDamage { min: f32, max: f32 },
    /// Variant selector in `[min, max]`.
    SetData { min: u32, max: u32 },
    /// Random effect from a non-empty list; no-op on non-stew items.
    SetStewEffect { effects: Vec<String> },
    Custom(Arc<dyn CustomFunction>),
}

impl FunctionKind {
    pub fn set_count(min: u32, max: u32) -> Result<Self, LootError> {
        check_order("count", min as f64, max as f64)?;
        Ok(FunctionKind::SetCount { min, max })
    }

    pub fn set_damage(min: f32, max: f32) -> Result<Self, LootError> {
        for (field, value) in [("min", min), ("max", max)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LootError::InvalidChance {
                    field: field.to_string(),
                    value,
                });
            }
        }
        check_order("damage", min as f64, max as f64)?;
        Ok(FunctionKind::SetDamage { min, max })
    }

    pub fn set_data(min: u32, max: u32) -> Result<Self, LootError> {
        check_order("data", min as f64, max as f64)?;
        Ok(FunctionKind::SetData { min, max })
    }

    pub fn set_stew_effect(effects: Vec<String>) -> Result<Self, LootError> {
        if effects.is_empty() {
            return Err(LootError::InvalidField {
                field: "effects".to_string(),
                expected: "a non-empty list of effect ids",
            });
        }
        Ok(FunctionKind::SetStewEffect { effects })
    }

    /// The variant tag matching the built-in registration.
    pub fn tag(&self) -> &'static str {
        match self {
            FunctionKind::EnchantRandomly { .. } => "enchant_randomly",
            FunctionKind::RandomDye => "random_dye",
            FunctionKind::SetCount { .. } => "set_count",
            FunctionKind::SetName { .. } => "set_name",
            FunctionKind::SetDamage { .. } => "set_damage",
            FunctionKind::SetData { .. } => "set_data",
            FunctionKind::SetStewEffect { .. } => "set_stew_effect",
            FunctionKind::Custom(custom) => custom.tag(),
        }
    }
}

/// A [`FunctionKind`] plus the conditions gating whether it runs at all.
#[derive(Debug, Clone)]
pub struct EntryFunction {
    kind: FunctionKind,
    conditions: Vec<LootCondition>,
}

impl EntryFunction {
    pub fn new(kind: FunctionKind, conditions: Vec<LootCondition>) -> Self {
        Self { kind, conditions }
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn conditions(&self) -> &[LootCondition] {
        &self.conditions
    }

    /// Whether this function participates. Evaluated once per entry
    /// generation and applied to both phases.
    pub(crate) fn qualifies(&self, ctx: &mut LootContext) -> bool {
        all_pass(&self.conditions, ctx)
    }

    pub(crate) fn pre_create(&self, ctx: &mut LootContext, mut seed: StackSeed) -> StackSeed {
        match &self.kind {
            FunctionKind::SetCount { min, max } => {
                seed.count = ctx.rng().next_range(*min, *max) as i32;
                seed
            }
            FunctionKind::SetData { min, max } => {
                seed.meta = ctx.rng().next_range(*min, *max) as i32;
                seed
            }
            FunctionKind::Custom(custom) => custom.pre_create(ctx, seed),
            _ => seed,
        }
    }

    pub(crate) fn on_create(&self, ctx: &mut LootContext, mut item: ItemStack) -> ItemStack {
        match &self.kind {
            FunctionKind::EnchantRandomly { treasure } => {
                let pool: Vec<_> = ENCHANTMENT_LIST
                    .iter()
                    .filter(|e| *treasure || !e.treasure)
                    .collect();
                let pick = pool[ctx.rng().next_bounded(pool.len() as u32) as usize];
                let level = ctx.rng().next_range(1, pick.max_level as u32) as i16;
                item.enchantments.push(EnchantmentInstance {
                    id: pick.id,
                    level,
                });
                item
            }
            FunctionKind::RandomDye => {
                let dyeable = ctx.items().lookup(&item.name).is_some_and(|i| i.dyeable);
                if dyeable {
                    let pick = ctx.rng().next_bounded(DYE_COLORS.len() as u32) as usize;
                    item.color = Some(DYE_COLORS[pick]);
                }
                item
            }
            FunctionKind::SetName { name } => {
                item.custom_name = Some(name.clone());
                item
            }
            FunctionKind::SetDamage { min, max } => {
                let max_durability = ctx.items().lookup(&item.name).and_then(|i| i.max_durability);
                if let Some(max_durability) = max_durability {
                    let durability = max_durability.saturating_sub(item.damage.unwrap_or(0));
                    let fraction = ctx.rng().next_float() * (max - min) + min;
                    let kept = (fraction * durability as f32).ceil() as u32;
                    item.damage = Some(durability.saturating_sub(kept));
                }
                item
            }
            FunctionKind::SetStewEffect { effects } => {
                let stew = ctx.items().lookup(&item.name).is_some_and(|i| i.stew);
                if stew {
                    let pick = ctx.rng().next_bounded(effects.len() as u32) as usize;
                    item.stew_effect = Some(effects[pick].clone());
                }
                item
            }
            FunctionKind::Custom(custom) => custom.on_create(ctx, item),
            _ => item,
        }
    }
}

fn check_order(field: &str, min: f64, max: f64) -> Result<(), LootError> {
    if min > max {
        return Err(LootError::InvalidRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

/// Reads a `key: n` or `key: {min, max}` integer field.
fn int_range(fields: &Map<String, Value>, key: &'static str) -> Result<(u32, u32), LootError> {
    let value = fields
        .get(key)
        .ok_or_else(|| LootError::MissingField(key.to_string()))?;
    match value {
        Value::Number(_) => {
            let n = read_u32(value, key)?;
            Ok((n, n))
        }
        Value::Object(bounds) => {
            let min = read_u32(required(bounds, "min")?, "min")?;
            let max = read_u32(required(bounds, "max")?, "max")?;
            Ok((min, max))
        }
        _ => Err(LootError::InvalidField {
            field: key.to_string(),
            expected: "an integer or a {min, max} object",
        }),
    }
}

/// Reads a `key: x` or `key: {min, max}` float field.
fn float_range(fields: &Map<String, Value>, key: &'static str) -> Result<(f32, f32), LootError> {
    let value = fields
        .get(key)
        .ok_or_else(|| LootError::MissingField(key.to_string()))?;
    match value {
        Value::Number(_) => {
            let n = read_f32(value, key)?;
            Ok((n, n))
        }
        Value::Object(bounds) => {
            let min = read_f32(required(bounds, "min")?, "min")?;
            let max = read_f32(required(bounds, "max")?, "max")?;
            Ok((min, max))
        }
        _ => Err(LootError::InvalidField {
            field: key.to_string(),
            expected: "a number or a {min, max} object",
        }),
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, LootError> {
    fields
        .get(key)
        .ok_or_else(|| LootError::MissingField(key.to_string()))
}

fn read_u32(value: &Value, field: &'static str) -> Result<u32, LootError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(LootError::InvalidField {
            field: field.to_string(),
            expected: "a non-negative integer",
        })
}

fn read_f32(value: &Value, field: &'static str) -> Result<f32, LootError> {
    value
        .as_f64()
        .map(|n| n as f32)
        .ok_or(LootError::InvalidField {
            field: field.to_string(),
            expected: "a number",
        })
}

/// Registry of entry function builders keyed by normalized save name.
pub type FunctionRegistry = Registry<FunctionKind>;

impl Registry<FunctionKind> {
    /// An empty function registry.
    pub fn empty() -> Self {
        Registry::with_unknown(LootError::UnknownFunction)
    }

    /// A registry pre-populated with the built-in entry functions.
    pub fn vanilla() -> Self {
        let mut registry = Self::empty();
        registry
            .register(
                "enchant_randomly",
                &["enchant_randomly"],
                |fields| {
                    let treasure = match fields.get("treasure") {
                        None => false,
                        Some(value) => value.as_bool().ok_or(LootError::InvalidField {
                            field: "treasure".to_string(),
                            expected: "a boolean",
                        })?,
                    };
                    Ok(FunctionKind::EnchantRandomly { treasure })
                },
                false,
            )
            .expect("fresh registry");
        registry
            .register("random_dye", &["random_dye"], |_| Ok(FunctionKind::RandomDye), false)
            .expect("fresh registry");
        registry
            .register(
                "set_count",
                &["set_count"],
                |fields| {
                    let (min, max) = int_range(fields, "count")?;
                    FunctionKind::set_count(min, max)
                },
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "set_name",
                &["set_name", "set_custom_name"],
                |fields| {
                    let name = required(fields, "name")?
                        .as_str()
                        .ok_or(LootError::InvalidField {
                            field: "name".to_string(),
                            expected: "a string",
                        })?;
                    Ok(FunctionKind::SetName {
                        name: name.to_string(),
                    })
                },
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "set_damage",
                &["set_damage"],
                |fields| {
                    let (min, max) = float_range(fields, "damage")?;
                    FunctionKind::set_damage(min, max)
                },
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "set_data",
                &["set_data", "set_meta"],
                |fields| {
                    let (min, max) = int_range(fields, "data")?;
                    FunctionKind::set_data(min, max)
                },
                false,
            )
            .expect("fresh registry");
        registry
            .register(
                "set_stew_effect",
                &["set_stew_effect", "set_suspicious_stew_type"],
                |fields| {
                    let list = required(fields, "effects")?
                        .as_array()
                        .ok_or(LootError::InvalidField {
                            field: "effects".to_string(),
                            expected: "a list of {id} objects",
                        })?;
                    let mut effects = Vec::with_capacity(list.len());
                    for entry in list {
                        let id = entry
                            .get("id")
                            .and_then(Value::as_str)
                            .ok_or(LootError::InvalidField {
                                field: "effects".to_string(),
                                expected: "a list of {id} objects",
                            })?;
                        effects.push(id.to_string());
                    }
                    FunctionKind::set_stew_effect(effects)
                },
                false,
            )
            .expect("fresh registry");
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Difficulty, LootOrigin, WorldView};
    use crate::item::{ItemInfo, SimpleItemCatalog};
    use crate::random::SequenceRandom;
    use serde_json::json;

    fn catalog() -> SimpleItemCatalog {
        let mut catalog = SimpleItemCatalog::new();
        catalog.insert(ItemInfo::new("minecraft:apple", 64));
        let mut cap = ItemInfo::new("minecraft:leather_cap", 1);
        cap.dyeable = true;
        cap.max_durability = Some(55);
        catalog.insert(cap);
        let mut stew = ItemInfo::new("minecraft:suspicious_stew", 1);
        stew.stew = true;
        catalog.insert(stew);
        catalog
    }

    fn ctx<'a>(catalog: &'a SimpleItemCatalog, rng: &'a mut SequenceRandom) -> LootContext<'a> {
        LootContext::new(
            WorldView::new(Difficulty::Normal),
            LootOrigin::Unknown,
            catalog,
            rng,
        )
    }

    #[test]
    fn set_count_rejects_inverted_range() {
        assert!(matches!(
            FunctionKind::set_count(5, 2),
            Err(LootError::InvalidRange { .. })
        ));
    }

    #[test]
    fn set_damage_rejects_fraction_outside_unit_interval() {
        assert!(matches!(
            FunctionKind::set_damage(0.2, 1.5),
            Err(LootError::InvalidChance { .. })
        ));
    }

    #[test]
    fn pre_create_folds_in_list_order() {
        let catalog = catalog();
        let mut rng = SequenceRandom::new([3, 7], []);
        let mut ctx = ctx(&catalog, &mut rng);

        let count = EntryFunction::new(FunctionKind::set_count(3, 3).unwrap(), vec![]);
        let data = EntryFunction::new(FunctionKind::set_data(7, 7).unwrap(), vec![]);

        let mut seed = StackSeed::default();
        seed = count.pre_create(&mut ctx, seed);
        seed = data.pre_create(&mut ctx, seed);
        assert_eq!(seed, StackSeed { meta: 7, count: 3 });
    }

    #[test]
    fn failing_condition_skips_function() {
        let catalog = catalog();
        let mut rng = SequenceRandom::new([], [0.9]);
        let mut ctx = ctx(&catalog, &mut rng);

        let gated = EntryFunction::new(
            FunctionKind::set_count(9, 9).unwrap(),
            vec![LootCondition::random_chance(0.5).unwrap()],
        );
        assert!(!gated.qualifies(&mut ctx));
    }

    #[test]
    fn random_dye_is_noop_on_non_dyeable_items() {
        let catalog = catalog();
        let mut rng = SequenceRandom::new([4], []);
        let mut ctx = ctx(&catalog, &mut rng);

        let dye = EntryFunction::new(FunctionKind::RandomDye, vec![]);
        let apple = dye.on_create(&mut ctx, ItemStack::new("minecraft:apple", 0, 1));
        assert_eq!(apple.color, None);

        let cap = dye.on_create(&mut ctx, ItemStack::new("minecraft:leather_cap", 0, 1));
        assert_eq!(cap.color, Some(DYE_COLORS[4]));
    }

    #[test]
    fn set_damage_applies_only_to_durable_items() {
        let catalog = catalog();
        let mut rng = SequenceRandom::new([], [0.0, 0.0]);
        let mut ctx = ctx(&catalog, &mut rng);

        let damage = EntryFunction::new(FunctionKind::set_damage(1.0, 1.0).unwrap(), vec![]);
        // Full durability fraction keeps the item pristine.
        let cap = damage.on_create(&mut ctx, ItemStack::new("minecraft:leather_cap", 0, 1));
        assert_eq!(cap.damage, Some(0));

        let apple = damage.on_create(&mut ctx, ItemStack::new("minecraft:apple", 0, 1));
        assert_eq!(apple.damage, None);
    }

    #[test]
    fn stew_effect_picks_from_list() {
        let catalog = catalog();
        let mut rng = SequenceRandom::new([1], []);
        let mut ctx = ctx(&catalog, &mut rng);

        let stew = EntryFunction::new(
            FunctionKind::set_stew_effect(vec!["blindness".into(), "jump_boost".into()]).unwrap(),
            vec![],
        );
        let item = stew.on_create(&mut ctx, ItemStack::new("minecraft:suspicious_stew", 0, 1));
        assert_eq!(item.stew_effect.as_deref(), Some("jump_boost"));
    }

    #[test]
    fn enchant_randomly_respects_treasure_flag() {
        let catalog = catalog();
        // Scripted pick lands on the last pool slot; without the treasure
        // flag that slot must still be a non-treasure enchantment.
        let mut rng = SequenceRandom::new([u32::MAX, 1], []);
        let mut ctx = ctx(&catalog, &mut rng);

        let enchant = EntryFunction::new(
            FunctionKind::EnchantRandomly { treasure: false },
            vec![],
        );
        let item = enchant.on_create(&mut ctx, ItemStack::new("minecraft:apple", 0, 1));
        let applied = item.enchantments[0];
        let info = ENCHANTMENT_LIST.iter().find(|e| e.id == applied.id).unwrap();
        assert!(!info.treasure);
        assert!(applied.level >= 1 && applied.level <= info.max_level);
    }

    #[test]
    fn vanilla_registry_parses_scalar_and_range_shapes() {
        let registry = FunctionRegistry::vanilla();

        let scalar = json!({ "count": 5 });
        let kind = registry.create("set_count", scalar.as_object().unwrap()).unwrap();
        assert!(matches!(kind, FunctionKind::SetCount { min: 5, max: 5 }));

        let range = json!({ "count": { "min": 1, "max": 3 } });
        let kind = registry.create("set_count", range.as_object().unwrap()).unwrap();
        assert!(matches!(kind, FunctionKind::SetCount { min: 1, max: 3 }));

        let inverted = json!({ "count": { "min": 3, "max": 1 } });
        assert!(matches!(
            registry.create("set_count", inverted.as_object().unwrap()),
            Err(LootError::InvalidRange { .. })
        ));
    }

    #[test]
    fn set_meta_alias_maps_to_set_data() {
        let registry = FunctionRegistry::vanilla();
        let fields = json!({ "data": 2 });
        let kind = registry
            .create("minecraft:set_meta", fields.as_object().unwrap())
            .unwrap();
        assert!(matches!(kind, FunctionKind::SetData { min: 2, max: 2 }));
        assert_eq!(registry.save_id(kind.tag()).unwrap(), "set_data");
    }
}
