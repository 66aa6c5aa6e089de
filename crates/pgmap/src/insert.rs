//! Multi-row INSERT statements.

use crate::client::Executor;
use crate::descriptor::ColumnSet;
use crate::error::{MapError, MapResult};
use crate::ident::{IntoTable, Table};
use crate::mapper::{Mapper, log_statement};
use crate::record::{AnyRecord, Fields, Record, RecordType, read_field};
use crate::statement::Statement;
use crate::tag::Context;

impl Mapper {
    /// Build `insert into <table>(<cols>) values (...), (...)` for `records`.
    ///
    /// Every record gets its own tuple of placeholders; arguments are row-major.
    pub fn build_insert<R: Record>(
        &self,
        table: impl IntoTable,
        records: &[R],
    ) -> MapResult<Statement> {
        let table = table.into_table()?;
        if records.is_empty() {
            return Err(MapError::NoRecords);
        }
        let columns = self.column_set(&RecordType::of::<R>(), Context::Insert)?;
        values(&table, &columns, records.iter())
    }

    /// Like [`Mapper::build_insert`], for records whose type is only known at runtime.
    ///
    /// All records must share the first record's type.
    pub fn build_insert_dyn(
        &self,
        table: impl IntoTable,
        records: &[&dyn AnyRecord],
    ) -> MapResult<Statement> {
        let table = table.into_table()?;
        let first = records.first().ok_or(MapError::NoRecords)?.record_type();
        for record in records {
            let found = record.record_type();
            if found != first {
                return Err(MapError::TypeMismatch {
                    expected: first.name,
                    found: found.name,
                });
            }
        }
        let columns = self.column_set(&first, Context::Insert)?;
        values(&table, &columns, records.iter().copied())
    }

    /// Insert `records` and return the number of rows written.
    pub async fn insert<R, E>(
        &self,
        executor: &E,
        table: impl IntoTable,
        records: &[R],
    ) -> MapResult<u64>
    where
        R: Record,
        E: Executor,
    {
        let stmt = self.build_insert(table, records)?;
        log_statement("insert", &stmt);
        executor.execute(stmt.sql(), stmt.args()).await
    }
}

fn values<'a, F, I>(table: &Table, columns: &ColumnSet, records: I) -> MapResult<Statement>
where
    F: Fields + ?Sized + 'a,
    I: Iterator<Item = &'a F>,
{
    if columns.is_empty() {
        return Err(MapError::NoColumns {
            record: columns.record(),
            context: columns.context(),
        });
    }

    let mut stmt = Statement::new(format!(
        "insert into {table}({}) values ",
        columns.to_sql_list()
    ));
    for (row, record) in records.enumerate() {
        if row > 0 {
            stmt.push(", ");
        }
        stmt.push("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                stmt.push(", ");
            }
            let field = read_field(record, &column.path, &column.name)?;
            stmt.push_bind(field.value());
        }
        stmt.push(")");
    }
    Ok(stmt)
}
