//! String-keyed variant registries shared by conditions and entry functions.
//!
//! Both registries follow the same rules: a variant registers under an
//! ordered, non-empty name list, the first name is canonical (written back
//! when serializing), every name is accepted on read, and lookups are
//! normalized the same way save data is.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::LootError;

/// Normalizes a save identifier: trim, lowercase, strip the reserved
/// `minecraft:` qualifier, spaces become underscores.
pub fn normalize_save_name(input: &str) -> String {
    let lowered = input.trim().to_ascii_lowercase();
    lowered
        .strip_prefix("minecraft:")
        .unwrap_or(&lowered)
        .replace(' ', "_")
}

type Builder<T> = Arc<dyn Fn(&Map<String, Value>) -> Result<T, LootError> + Send + Sync>;

/// Maps normalized names to variant builders, and variant tags back to their
/// canonical save id.
pub struct Registry<T> {
    builders: HashMap<String, Builder<T>>,
    save_ids: HashMap<&'static str, String>,
    unknown: fn(String) -> LootError,
}

impl<T> Registry<T> {
    pub(crate) fn with_unknown(unknown: fn(String) -> LootError) -> Self {
        Self {
            builders: HashMap::new(),
            save_ids: HashMap::new(),
            unknown,
        }
    }

    /// Registers a variant builder under one or more names. The first name
    /// becomes the canonical save id for `tag`. Fails on an empty name list,
    /// or when the canonical name is taken and `override_existing` is false.
    pub fn register<F>(
        &mut self,
        tag: &'static str,
        names: &[&str],
        builder: F,
        override_existing: bool,
    ) -> Result<(), LootError>
    where
        F: Fn(&Map<String, Value>) -> Result<T, LootError> + Send + Sync + 'static,
    {
        let canonical = normalize_save_name(names.first().ok_or(LootError::EmptyNames)?);
        if !override_existing && self.builders.contains_key(&canonical) {
            return Err(LootError::DuplicateRegistration(canonical));
        }

        let builder: Builder<T> = Arc::new(builder);
        for name in names {
            self.builders
                .insert(normalize_save_name(name), Arc::clone(&builder));
        }
        self.save_ids.insert(tag, canonical);
        Ok(())
    }

    /// Builds a variant from its save name and data fields. An unknown name
    /// and malformed fields are distinct failures: the former reports the
    /// name, the latter comes from the builder and names the bad field.
    pub fn create(&self, name: &str, fields: &Map<String, Value>) -> Result<T, LootError> {
        let builder = self
            .builders
            .get(&normalize_save_name(name))
            .ok_or_else(|| (self.unknown)(name.to_string()))?;
        builder(fields)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(&normalize_save_name(name))
    }

    /// The canonical save id for a registered variant tag. Failing here is a
    /// programming error (serializing a variant nobody registered), not a
    /// data error.
    pub fn save_id(&self, tag: &'static str) -> Result<&str, LootError> {
        self.save_ids
            .get(tag)
            .map(String::as_str)
            .ok_or(LootError::UnregisteredVariant(tag))
    }
}
