//! Error types for pgmap

use thiserror::Error;

/// Result type alias for pgmap operations
pub type MapResult<T> = Result<T, MapError>;

/// Error types for mapping, statement building and execution.
///
/// Everything except [`MapError::Query`] and [`MapError::Pool`] is a "shape" error raised
/// locally before or while mapping; those two pass collaborator failures through unchanged.
#[derive(Debug, Error)]
pub enum MapError {
    /// The destination cannot be written through the resolved access path
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// A multi-row insert mixed record types
    #[error("Type mismatch: {expected} and {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Insert was given an empty sequence
    #[error("No records given")]
    NoRecords,

    /// The record type resolved to zero columns for the requested context
    #[error("No columns available for {context} on {record}")]
    NoColumns {
        record: &'static str,
        context: crate::tag::Context,
    },

    /// Every updatable field held its zero value
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// A returned column matched no field of the destination record
    #[error("No field for column {0}")]
    NoFieldForColumn(String),

    /// A base-type destination was given a result with more or fewer than one column
    #[error("Can't scan {columns} columns into {target}")]
    ColumnCountMismatch {
        columns: usize,
        target: &'static str,
    },

    /// A row carried a different number of values than the cursor reported columns
    #[error("Row has {found} values for {expected} columns")]
    RowLength { expected: usize, found: usize },

    /// A scalar destination saw zero rows
    #[error("No rows in result set")]
    NoRows,

    /// A field annotation does not follow `name`, `name/context,...` or `-`
    #[error("Invalid tag {tag:?}: {message}")]
    InvalidTag { tag: String, message: String },

    /// Two fields resolved to the same column in one context
    #[error("Duplicate column '{column}' on {record} for {context}")]
    DuplicateColumn {
        record: &'static str,
        column: String,
        context: crate::tag::Context,
    },

    /// A table identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// UPDATE was given an empty WHERE fragment
    #[error("Update requires a WHERE clause")]
    MissingWhere,

    /// Value decode/conversion error for a column
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl MapError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_ident(message: impl Into<String>) -> Self {
        Self::InvalidIdent(message.into())
    }

    /// Check if this error came from the database driver or pool rather than from mapping
    pub fn is_driver_error(&self) -> bool {
        match self {
            Self::Query(_) => true,
            #[cfg(feature = "pool")]
            Self::Pool(_) => true,
            _ => false,
        }
    }

    /// Check if this is a no rows error
    pub fn is_no_rows(&self) -> bool {
        matches!(self, Self::NoRows)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for MapError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
