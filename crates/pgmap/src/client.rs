//! The executor seam between statement building and the database.

use crate::error::{MapError, MapResult};
use crate::scan::RowCursor;
use crate::statement::params_ref;
use crate::value::Value;
use tokio_postgres::Row;

/// Runs statements built by a [`Mapper`](crate::Mapper).
///
/// Implemented for `tokio_postgres::Client`, `tokio_postgres::Transaction` and, with the
/// `pool` feature, pooled `deadpool_postgres` connections, so the same mapping code runs
/// inside or outside a transaction.
pub trait Executor: Send + Sync {
    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = MapResult<u64>> + Send;

    /// Execute a query and return its columns and rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = MapResult<PgRows>> + Send;
}

/// Rows returned by an [`Executor`], decoded into [`Value`]s one row at a time.
///
/// Column names come from the prepared statement, so they are known even when no row was
/// returned.
#[derive(Debug)]
pub struct PgRows {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Row>,
}

impl PgRows {
    pub fn new(statement: &tokio_postgres::Statement, rows: Vec<Row>) -> Self {
        Self {
            columns: statement
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            rows: rows.into_iter(),
        }
    }

    /// Rows not yet read.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowCursor for PgRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> MapResult<Option<Vec<Value>>> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                row.try_get::<_, Value>(i)
                    .map_err(|e| MapError::decode(column.as_str(), e.to_string()))
            })
            .collect::<MapResult<Vec<_>>>()
            .map(Some)
    }
}

impl Executor for tokio_postgres::Client {
    async fn execute(&self, sql: &str, args: &[Value]) -> MapResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, &params_ref(args)).await?)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> MapResult<PgRows> {
        let statement = self.prepare(sql).await?;
        let rows = tokio_postgres::Client::query(self, &statement, &params_ref(args)).await?;
        Ok(PgRows::new(&statement, rows))
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn execute(&self, sql: &str, args: &[Value]) -> MapResult<u64> {
        Ok(tokio_postgres::Transaction::execute(self, sql, &params_ref(args)).await?)
    }

    async fn query(&self, sql: &str, args: &[Value]) -> MapResult<PgRows> {
        let statement = self.prepare(sql).await?;
        let rows = tokio_postgres::Transaction::query(self, &statement, &params_ref(args)).await?;
        Ok(PgRows::new(&statement, rows))
    }
}
