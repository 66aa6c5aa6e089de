//! UPDATE statements built from the non-zero fields of a record.

use crate::client::Executor;
use crate::error::{MapError, MapResult};
use crate::ident::IntoTable;
use crate::mapper::{Mapper, log_statement};
use crate::record::{Record, RecordType, read_field};
use crate::statement::Statement;
use crate::tag::Context;

impl Mapper {
    /// Build `update <table> set <col> = $1, ... where <filter>`.
    ///
    /// Only fields holding a non-zero value are written; use `Option<T>` to write an
    /// explicit zero. The filter numbers its own placeholders from `$1`; they are shifted
    /// past the SET arguments.
    ///
    /// ```ignore
    /// let stmt = mapper.build_update("users", &patch, Statement::new("id = $1").bind(id))?;
    /// ```
    pub fn build_update<R: Record>(
        &self,
        table: impl IntoTable,
        record: &R,
        filter: impl Into<Statement>,
    ) -> MapResult<Statement> {
        let table = table.into_table()?;
        let filter = filter.into();
        let columns = self.column_set(&RecordType::of::<R>(), Context::Update)?;

        let mut stmt = Statement::new(format!("update {table} set "));
        let mut set = 0;
        for column in columns.iter() {
            let field = read_field(record, &column.path, &column.name)?;
            if field.is_zero() {
                continue;
            }
            if set > 0 {
                stmt.push(", ");
            }
            stmt.push(&column.name).push(" = ").push_bind(field.value());
            set += 1;
        }

        if set == 0 {
            return Err(MapError::NoFieldsToUpdate);
        }
        if filter.is_empty() {
            return Err(MapError::MissingWhere);
        }

        stmt.push(" where ");
        stmt.append(filter);
        Ok(stmt)
    }

    /// Update the rows selected by `filter` and return how many were touched.
    pub async fn update<R, E>(
        &self,
        executor: &E,
        table: impl IntoTable,
        record: &R,
        filter: impl Into<Statement>,
    ) -> MapResult<u64>
    where
        R: Record,
        E: Executor,
    {
        let stmt = self.build_update(table, record, filter)?;
        log_statement("update", &stmt);
        executor.execute(stmt.sql(), stmt.args()).await
    }
}
