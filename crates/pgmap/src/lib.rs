//! # pgmap
//!
//! A record mapping layer for Postgres on top of `tokio-postgres`.
//!
//! ## Features
//!
//! - **Tagged records**: `#[derive(Record)]` describes how struct fields map to columns,
//!   per context (insert, update, select)
//! - **Statement builders**: multi-row INSERT and zero-skipping UPDATE with correctly
//!   numbered `$N` placeholders
//! - **Row mapping**: rows onto records, sequences, or bare values, with one-to-many
//!   aggregation into `Vec<T>` fields
//! - **Transaction-friendly**: pass a transaction anywhere an [`Executor`] is expected
//! - **Safe defaults**: UPDATE requires WHERE and at least one field; table names are validated
//!
//! ## Tags
//!
//! ```ignore
//! use pgmap::Record;
//!
//! #[derive(Debug, Default, Record)]
//! pub struct User {
//!     // read back, never written
//!     #[sql("id/insert/update")]
//!     pub id: i64,
//!     // untagged: column `name`
//!     pub name: String,
//!     #[sql("-")]
//!     pub scratch: String,
//!     // aggregated from joined rows
//!     #[sql("role")]
//!     pub roles: Vec<String>,
//! }
//! ```
//!
//! ## Statements
//!
//! ```ignore
//! use pgmap::{Mapper, Statement};
//!
//! let mapper = Mapper::new();
//!
//! mapper.insert(&client, "users", &users).await?;
//! mapper
//!     .update(&client, "users", &patch, Statement::new("id = $1").bind(user.id))
//!     .await?;
//!
//! let users: Vec<User> = mapper
//!     .fetch_all(
//!         &client,
//!         "select u.id, u.name, r.role from users u left join roles r on r.user_id = u.id",
//!     )
//!     .await?;
//! ```

pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod record;
pub mod reindex;
pub mod scan;
pub mod statement;
pub mod tag;
pub mod value;

mod cache;
mod insert;
mod mapper;
mod update;

#[cfg(test)]
mod fixtures;

pub use client::{Executor, PgRows};
pub use config::{MapConfig, Naming, UnmatchedColumns};
pub use descriptor::{ColumnSet, FieldDescriptor, descriptors};
pub use error::{MapError, MapResult};
pub use ident::{IntoTable, Table};
pub use mapper::Mapper;
pub use record::{
    AnyRecord, Field, FieldDef, FieldKind, FieldMut, FieldRef, Fields, Record, RecordType,
    RepeatedField, field_at, field_at_mut,
};
pub use reindex::reindex;
pub use scan::{MemoryCursor, RowCursor};
pub use statement::Statement;
pub use tag::{Context, ContextSet, Tag};
pub use value::{FromValue, SqlValue, ToValue, Value, ValueError};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "derive")]
pub use pgmap_derive::Record;
