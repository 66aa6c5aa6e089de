//! Mapper configuration.

use serde::Deserialize;

/// How fields without an annotation are named, and how returned columns are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// Untagged fields map to their lower-cased identifier; returned columns fall back to a
    /// case-insensitive match.
    #[default]
    Lenient,
    /// Only annotated fields are mapped; returned columns must match exactly.
    Strict,
}

/// What to do with a returned column that matches no destination field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedColumns {
    #[default]
    Error,
    Ignore,
}

/// Configuration for [`Mapper`](crate::Mapper).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub naming: Naming,
    pub unmatched: UnmatchedColumns,
    /// Memoize resolved column sets per record type and context.
    pub cache_descriptors: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            naming: Naming::Lenient,
            unmatched: UnmatchedColumns::Error,
            cache_descriptors: true,
        }
    }
}

impl MapConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map annotated fields only and match returned columns exactly.
    pub fn strict(mut self) -> Self {
        self.naming = Naming::Strict;
        self
    }

    /// Derive names for untagged fields and match returned columns case-insensitively.
    pub fn lenient(mut self) -> Self {
        self.naming = Naming::Lenient;
        self
    }

    /// Set the naming policy.
    pub fn naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    /// Silently drop returned columns that match no field.
    pub fn ignore_unmatched(mut self) -> Self {
        self.unmatched = UnmatchedColumns::Ignore;
        self
    }

    /// Disable the descriptor cache.
    pub fn no_cache(mut self) -> Self {
        self.cache_descriptors = false;
        self
    }
}
