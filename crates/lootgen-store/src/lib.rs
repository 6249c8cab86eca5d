//! Filesystem persistence for loot tables: scans a data root's
//! `loot_tables/` directory, resolves cross-table references on demand,
//! and writes tables back in their canonical JSON form.

pub mod store;

pub use store::{load_dir, save_table, StoreError, TableStore};
