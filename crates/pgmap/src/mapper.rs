//! The mapping entry point.

use crate::cache::DescriptorCache;
use crate::config::MapConfig;
use crate::descriptor::ColumnSet;
use crate::error::MapResult;
use crate::record::{Record, RecordType};
use crate::statement::Statement;
use crate::tag::Context;
use std::sync::Arc;

/// Builds statements from records and maps result rows back onto them.
///
/// A `Mapper` owns its configuration and a cache of resolved column sets, so it is meant
/// to be created once and shared (it is `Send + Sync`).
///
/// # Example
/// ```ignore
/// use pgmap::{Mapper, Record, Statement};
///
/// #[derive(Debug, Default, Record)]
/// pub struct User {
///     #[sql("id/insert")]
///     pub id: i64,
///     pub name: String,
/// }
///
/// let mapper = Mapper::new();
/// let stmt = mapper.build_insert("users", &[User { id: 0, name: "alice".into() }])?;
/// assert_eq!(stmt.sql(), "insert into users(name) values ($1)");
///
/// let users: Vec<User> = mapper.fetch_all(&client, Statement::new("select id, name from users")).await?;
/// ```
#[derive(Debug, Default)]
pub struct Mapper {
    config: MapConfig,
    cache: DescriptorCache,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MapConfig) -> Self {
        Self {
            config,
            cache: DescriptorCache::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The columns of `R` for `context`.
    pub fn columns<R: Record>(&self, context: Context) -> MapResult<Arc<ColumnSet>> {
        self.column_set(&RecordType::of::<R>(), context)
    }

    pub(crate) fn column_set(
        &self,
        record: &RecordType,
        context: Context,
    ) -> MapResult<Arc<ColumnSet>> {
        if self.config.cache_descriptors {
            self.cache
                .get_or_resolve(record, context, self.config.naming)
        } else {
            ColumnSet::resolve(record, context, self.config.naming).map(Arc::new)
        }
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn log_statement(operation: &'static str, stmt: &Statement) {
    tracing::debug!(
        target: "pgmap.sql",
        operation,
        param_count = stmt.args().len(),
        sql = %stmt.sql(),
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn log_statement(_operation: &'static str, _stmt: &Statement) {}
