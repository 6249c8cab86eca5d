//! Data-driven loot generation: tables, pools, entries, conditions, and
//! entry functions, with a JSON codec compatible with behavior-pack data.

pub mod codec;
pub mod condition;
pub mod context;
pub mod entry;
pub mod error;
pub mod function;
pub mod item;
pub mod pool;
pub mod random;
pub mod registry;
pub mod table;

pub use codec::LootCodec;
pub use condition::{ConditionRegistry, CustomCondition, LootCondition};
pub use context::{ActorId, Difficulty, Killer, LootContext, LootOrigin, WorldView};
pub use entry::{EntryKind, LootEntry};
pub use error::LootError;
pub use function::{CustomFunction, EntryFunction, FunctionKind, FunctionRegistry, StackSeed};
pub use item::{ItemCatalog, ItemInfo, ItemStack, SimpleItemCatalog};
pub use pool::{LootPool, TieredPool, WeightedPool};
pub use random::{RandomSource, RngSource};
pub use registry::Registry;
pub use table::{LootTable, LootTableRegistry, TableResolver};
