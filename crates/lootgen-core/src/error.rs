//! Loot engine error types.

use thiserror::Error;

/// Errors raised while constructing, registering, or (de)serializing loot
/// data. Generation itself never fails — bad branches degrade to "no items".
#[derive(Debug, Error)]
pub enum LootError {
    #[error("weight must be at least 1")]
    InvalidWeight,

    #[error("min_rolls {min} is larger than max_rolls {max}")]
    InvalidRollBounds { min: u32, max: u32 },

    #[error("initial_range {range} is out of bounds for {entries} entries")]
    InvalidTierRange { range: u32, entries: usize },

    #[error("chance {value} in \"{field}\" must be between 0.0 and 1.0")]
    InvalidChance { field: String, value: f32 },

    #[error("min {min} is larger than max {max} in \"{field}\"")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("expected key \"{0}\"")]
    MissingField(String),

    #[error("unexpected value in key \"{field}\": expected {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    #[error("malformed loot data: {0}")]
    Malformed(String),

    #[error("loot condition \"{0}\" is not registered")]
    UnknownCondition(String),

    #[error("entry function \"{0}\" is not registered")]
    UnknownFunction(String),

    #[error("entry type \"{0}\" doesn't exist")]
    UnknownEntryType(String),

    #[error("loot table \"{0}\" is not registered")]
    UnknownTable(String),

    /// Programming error: a variant was serialized without ever being
    /// registered, so it has no save id.
    #[error("variant \"{0}\" is not registered, no save id available")]
    UnregisteredVariant(&'static str),

    #[error("\"{0}\" is already registered")]
    DuplicateRegistration(String),

    #[error("registration requires at least one name")]
    EmptyNames,

    #[error("cyclic loot table reference: {0}")]
    CyclicReference(String),

    /// Wraps an error with the authoring path that produced it, e.g.
    /// `pools[2].entries[0]`.
    #[error("{path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<LootError>,
    },
}

impl LootError {
    /// Prefixes this error with an authoring path segment. Nested segments
    /// accumulate front-to-back, so the outermost caller ends up first.
    pub(crate) fn at(self, segment: &str) -> LootError {
        match self {
            LootError::Context { path, source } => LootError::Context {
                path: format!("{segment}.{path}"),
                source,
            },
            other => LootError::Context {
                path: segment.to_string(),
                source: Box::new(other),
            },
        }
    }
}
