//! Mapping result rows onto records and values.
//!
//! Returned columns are matched to the select columns of the destination record. When a
//! matched column is repeated (`Vec<T>`), rows that agree on every other matched column
//! are folded into one record and the repeated values are appended. The rows
//!
//! ```text
//! a   | gr
//! ----+-------
//! one | group1
//! one | group2
//! two | NULL
//! ```
//!
//! scanned into `{ a: String, group: Vec<String> }` (with `group` tagged `gr`) give
//! `{ "one", ["group1", "group2"] }` and `{ "two", [] }`.

use crate::client::Executor;
use crate::config::UnmatchedColumns;
use crate::descriptor::{ColumnSet, FieldDescriptor};
use crate::error::{MapError, MapResult};
use crate::mapper::{Mapper, log_statement};
use crate::record::{FieldMut, Fields, Record, RecordType, read_field, write_field};
use crate::statement::Statement;
use crate::tag::Context;
use crate::value::{FromValue, Value};
use std::collections::VecDeque;

/// A forward-only source of rows with named columns.
pub trait RowCursor {
    fn columns(&self) -> &[String];

    /// The next row, one value per column, or `None` once exhausted.
    fn next_row(&mut self) -> MapResult<Option<Vec<Value>>>;
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: VecDeque<Vec<Value>>,
}

impl MemoryCursor {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
        }
    }

    /// Add a row.
    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push_back(values);
        self
    }

    pub fn push_row(&mut self, values: Vec<Value>) {
        self.rows.push_back(values);
    }
}

impl RowCursor for MemoryCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn next_row(&mut self) -> MapResult<Option<Vec<Value>>> {
        Ok(self.rows.pop_front())
    }
}

/// Which field each returned column lands in; `None` for dropped columns.
fn plan<'s>(
    set: &'s ColumnSet,
    returned: &[String],
    unmatched: UnmatchedColumns,
) -> MapResult<Vec<Option<&'s FieldDescriptor>>> {
    returned
        .iter()
        .map(|column| match (set.find(column), unmatched) {
            (Some(target), _) => Ok(Some(target)),
            (None, UnmatchedColumns::Ignore) => Ok(None),
            (None, UnmatchedColumns::Error) => Err(MapError::NoFieldForColumn(column.clone())),
        })
        .collect()
}

fn assign<F: Fields + ?Sized>(
    record: &mut F,
    target: &FieldDescriptor,
    value: Value,
) -> MapResult<()> {
    match write_field(record, &target.path, &target.name)? {
        FieldMut::Scalar(field) => field
            .assign(value)
            .map_err(|e| MapError::decode(target.name.as_str(), e.to_string())),
        FieldMut::Repeated(_) if value.is_null() => Ok(()),
        FieldMut::Repeated(field) => field
            .push_value(value)
            .map_err(|e| MapError::decode(target.name.as_str(), e.to_string())),
        FieldMut::Embedded(_) => Err(MapError::InvalidDestination(format!(
            "column {} maps onto an embedded record",
            target.name
        ))),
    }
}

fn check_row(columns: usize, row: &[Value]) -> MapResult<()> {
    if row.len() == columns {
        Ok(())
    } else {
        Err(MapError::RowLength {
            expected: columns,
            found: row.len(),
        })
    }
}

/// Values of the grouping columns.
fn key_of<F: Fields + ?Sized>(record: &F, keys: &[&FieldDescriptor]) -> MapResult<Vec<Value>> {
    keys.iter()
        .map(|k| read_field(record, &k.path, &k.name).map(|f| f.value()))
        .collect()
}

fn scan_records<R, C>(
    set: &ColumnSet,
    unmatched: UnmatchedColumns,
    mut cursor: C,
    dest: &mut Vec<R>,
) -> MapResult<()>
where
    R: Record + Default,
    C: RowCursor,
{
    let targets = plan(set, cursor.columns(), unmatched)?;
    let aggregate = targets.iter().flatten().any(|t| t.repeated);
    let key_fields: Vec<&FieldDescriptor> =
        targets.iter().flatten().copied().filter(|t| !t.repeated).collect();

    let mut keys = if aggregate {
        dest.iter()
            .map(|r| key_of(r, &key_fields))
            .collect::<MapResult<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let mut rows = 0usize;
    while let Some(row) = cursor.next_row()? {
        rows += 1;
        check_row(targets.len(), &row)?;
        let mut record = R::default();
        let mut held = Vec::new();
        for (target, value) in targets.iter().zip(row) {
            match target {
                Some(t) if t.repeated => held.push((*t, value)),
                Some(t) => assign(&mut record, t, value)?,
                None => {}
            }
        }

        if aggregate {
            let key = key_of(&record, &key_fields)?;
            if let Some(i) = keys.iter().position(|k| *k == key) {
                for (target, value) in held {
                    assign(&mut dest[i], target, value)?;
                }
                continue;
            }
            keys.push(key);
        }

        for (target, value) in held {
            assign(&mut record, target, value)?;
        }
        dest.push(record);
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "pgmap.scan",
        record = set.record(),
        rows,
        records = dest.len(),
        "mapped rows",
    );
    #[cfg(not(feature = "tracing"))]
    let _ = rows;

    Ok(())
}

fn scan_record<R, C>(
    set: &ColumnSet,
    unmatched: UnmatchedColumns,
    mut cursor: C,
    dest: &mut R,
) -> MapResult<()>
where
    R: Record,
    C: RowCursor,
{
    let targets = plan(set, cursor.columns(), unmatched)?;
    let row = cursor.next_row()?.ok_or(MapError::NoRows)?;
    check_row(targets.len(), &row)?;
    for (target, value) in targets.iter().zip(row) {
        if let Some(t) = target {
            assign(dest, t, value)?;
        }
    }
    Ok(())
}

fn single_column<T, C: RowCursor>(cursor: &C) -> MapResult<String> {
    match cursor.columns() {
        [column] => Ok(column.clone()),
        columns => Err(MapError::ColumnCountMismatch {
            columns: columns.len(),
            target: std::any::type_name::<T>(),
        }),
    }
}

fn decode<T: FromValue>(column: &str, row: Vec<Value>) -> MapResult<T> {
    check_row(1, &row)?;
    let value = row.into_iter().next().unwrap_or_default();
    T::from_value(value).map_err(|e| MapError::decode(column, e.to_string()))
}

impl Mapper {
    /// Populate `dest` from the first row; further rows are not read.
    ///
    /// Fields with no matching column keep their current value.
    pub fn scan_one<R: Record, C: RowCursor>(&self, cursor: C, dest: &mut R) -> MapResult<()> {
        let set = self.column_set(&RecordType::of::<R>(), Context::Select)?;
        scan_record(&set, self.config().unmatched, cursor, dest)
    }

    /// Append one record per row, or per group of rows when a repeated field is matched.
    ///
    /// Records already in `dest` take part in grouping.
    pub fn scan_all<R, C>(&self, cursor: C, dest: &mut Vec<R>) -> MapResult<()>
    where
        R: Record + Default,
        C: RowCursor,
    {
        let set = self.column_set(&RecordType::of::<R>(), Context::Select)?;
        scan_records(&set, self.config().unmatched, cursor, dest)
    }

    /// Read the single column of the first row.
    pub fn scan_value<T: FromValue, C: RowCursor>(
        &self,
        mut cursor: C,
        dest: &mut T,
    ) -> MapResult<()> {
        let column = single_column::<T, C>(&cursor)?;
        let row = cursor.next_row()?.ok_or(MapError::NoRows)?;
        *dest = decode(&column, row)?;
        Ok(())
    }

    /// Append the single column of every row.
    pub fn scan_values<T: FromValue, C: RowCursor>(
        &self,
        mut cursor: C,
        dest: &mut Vec<T>,
    ) -> MapResult<()> {
        let column = single_column::<T, C>(&cursor)?;
        while let Some(row) = cursor.next_row()? {
            dest.push(decode(&column, row)?);
        }
        Ok(())
    }

    /// Run `query` and map its first row.
    pub async fn fetch_one<R, E>(&self, executor: &E, query: impl Into<Statement>) -> MapResult<R>
    where
        R: Record + Default,
        E: Executor,
    {
        let query = query.into();
        log_statement("fetch_one", &query);
        let rows = executor.query(query.sql(), query.args()).await?;
        let mut record = R::default();
        self.scan_one(rows, &mut record)?;
        Ok(record)
    }

    /// Run `query` and map every row, grouping on repeated fields.
    pub async fn fetch_all<R, E>(
        &self,
        executor: &E,
        query: impl Into<Statement>,
    ) -> MapResult<Vec<R>>
    where
        R: Record + Default,
        E: Executor,
    {
        let query = query.into();
        log_statement("fetch_all", &query);
        let rows = executor.query(query.sql(), query.args()).await?;
        let mut records = Vec::new();
        self.scan_all(rows, &mut records)?;
        Ok(records)
    }

    /// Run `query` and read the single column of its first row.
    pub async fn fetch_value<T, E>(&self, executor: &E, query: impl Into<Statement>) -> MapResult<T>
    where
        T: FromValue,
        E: Executor,
    {
        let query = query.into();
        log_statement("fetch_value", &query);
        let mut rows = executor.query(query.sql(), query.args()).await?;
        let column = single_column::<T, _>(&rows)?;
        let row = rows.next_row()?.ok_or(MapError::NoRows)?;
        decode(&column, row)
    }

    /// Run `query` and read the single column of every row.
    pub async fn fetch_values<T, E>(
        &self,
        executor: &E,
        query: impl Into<Statement>,
    ) -> MapResult<Vec<T>>
    where
        T: FromValue,
        E: Executor,
    {
        let query = query.into();
        log_statement("fetch_values", &query);
        let rows = executor.query(query.sql(), query.args()).await?;
        let mut values = Vec::new();
        self.scan_values(rows, &mut values)?;
        Ok(values)
    }
}
