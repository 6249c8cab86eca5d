//! Item collaborator boundary: the engine treats items as opaque values and
//! asks a catalog for the few properties generation needs (existence, stack
//! size, durability, dye/stew capability).

use std::collections::HashMap;

/// Properties for a single item type, resolved by string identifier at
/// generation time.
#[derive(Debug, Clone)]
pub struct ItemInfo {
    /// Namespaced item identifier, e.g. `"minecraft:apple"`.
    pub name: String,
    /// Maximum stack size (1, 16, or 64 for vanilla items).
    pub max_stack_size: u8,
    /// Maximum durability, for items that take damage.
    pub max_durability: Option<u32>,
    /// Whether `random_dye` applies (leather armor).
    pub dyeable: bool,
    /// Whether `set_stew_effect` applies (suspicious stew).
    pub stew: bool,
}

impl ItemInfo {
    pub fn new(name: impl Into<String>, max_stack_size: u8) -> Self {
        Self {
            name: name.into(),
            max_stack_size,
            max_durability: None,
            dyeable: false,
            stew: false,
        }
    }
}

/// Resolves item identifiers during generation. Unknown identifiers are a
/// soft outcome: the affected entry yields nothing.
pub trait ItemCatalog {
    fn lookup(&self, name: &str) -> Option<&ItemInfo>;
}

/// Map-backed [`ItemCatalog`] for hosts without their own item registry.
#[derive(Debug, Clone, Default)]
pub struct SimpleItemCatalog {
    by_name: HashMap<String, ItemInfo>,
}

impl SimpleItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ItemInfo) {
        self.by_name.insert(info.name.clone(), info);
    }
}

impl ItemCatalog for SimpleItemCatalog {
    fn lookup(&self, name: &str) -> Option<&ItemInfo> {
        self.by_name.get(name)
    }
}

/// A produced item stack. `count` never exceeds the catalog's maximum stack
/// size for `name`; oversized results are split into several stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub name: String,
    /// Variant selector chosen before materialization.
    pub meta: i32,
    pub count: u32,
    pub custom_name: Option<String>,
    /// Damage already dealt to a durable item (0 = pristine).
    pub damage: Option<u32>,
    pub enchantments: Vec<EnchantmentInstance>,
    /// Armor dye color, RGB.
    pub color: Option<[u8; 3]>,
    /// Effect id for suspicious stew.
    pub stew_effect: Option<String>,
}

impl ItemStack {
    pub fn new(name: impl Into<String>, meta: i32, count: u32) -> Self {
        Self {
            name: name.into(),
            meta,
            count,
            custom_name: None,
            damage: None,
            enchantments: Vec::new(),
            color: None,
            stew_effect: None,
        }
    }
}

/// One enchantment applied to a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentInstance {
    pub id: i16,
    pub level: i16,
}

/// Static enchantment properties used by `enchant_randomly`.
#[derive(Debug, Clone, Copy)]
pub struct EnchantmentInfo {
    pub id: i16,
    pub name: &'static str,
    pub max_level: i16,
    /// Treasure enchantments are only rolled when the function asks for them.
    pub treasure: bool,
}

const fn ench(id: i16, name: &'static str, max_level: i16) -> EnchantmentInfo {
    EnchantmentInfo {
        id,
        name,
        max_level,
        treasure: false,
    }
}

const fn treasure(id: i16, name: &'static str, max_level: i16) -> EnchantmentInfo {
    EnchantmentInfo {
        id,
        name,
        max_level,
        treasure: true,
    }
}

/// Vanilla enchantments, Bedrock numeric ids.
pub const ENCHANTMENT_LIST: &[EnchantmentInfo] = &[
    ench(0, "protection", 4),
    ench(1, "fire_protection", 4),
    ench(2, "feather_falling", 4),
    ench(3, "blast_protection", 4),
    ench(4, "projectile_protection", 4),
    ench(5, "thorns", 3),
    ench(6, "respiration", 3),
    ench(7, "depth_strider", 3),
    ench(8, "aqua_affinity", 1),
    ench(9, "sharpness", 5),
    ench(10, "smite", 5),
    ench(11, "bane_of_arthropods", 5),
    ench(12, "knockback", 2),
    ench(13, "fire_aspect", 2),
    ench(14, "looting", 3),
    ench(15, "efficiency", 5),
    ench(16, "silk_touch", 1),
    ench(17, "unbreaking", 3),
    ench(18, "fortune", 3),
    ench(19, "power", 5),
    ench(20, "punch", 2),
    ench(21, "flame", 1),
    ench(22, "infinity", 1),
    ench(23, "luck_of_the_sea", 3),
    ench(24, "lure", 3),
    treasure(25, "frost_walker", 2),
    treasure(26, "mending", 1),
    treasure(27, "curse_of_binding", 1),
    treasure(28, "curse_of_vanishing", 1),
    ench(29, "impaling", 5),
    ench(30, "riptide", 3),
    ench(31, "loyalty", 3),
    ench(32, "channeling", 1),
    ench(33, "multishot", 1),
    ench(34, "piercing", 4),
    ench(35, "quick_charge", 3),
    treasure(36, "soul_speed", 3),
    treasure(37, "swift_sneak", 3),
];

/// Armor dye colors, RGB.
pub const DYE_COLORS: &[[u8; 3]] = &[
    [0xf0, 0xf0, 0xf0], // white
    [0xf9, 0x80, 0x1d], // orange
    [0xc7, 0x4e, 0xbd], // magenta
    [0x3a, 0xb3, 0xda], // light blue
    [0xfe, 0xd8, 0x3d], // yellow
    [0x80, 0xc7, 0x1f], // lime
    [0xf3, 0x8b, 0xaa], // pink
    [0x47, 0x4f, 0x52], // gray
    [0x9d, 0x9d, 0x97], // light gray
    [0x16, 0x9c, 0x9c], // cyan
    [0x89, 0x32, 0xb8], // purple
    [0x3c, 0x44, 0xaa], // blue
    [0x83, 0x54, 0x32], // brown
    [0x5e, 0x7c, 0x16], // green
    [0xb0, 0x2e, 0x26], // red
    [0x1d, 0x1d, 0x21], // black
];
