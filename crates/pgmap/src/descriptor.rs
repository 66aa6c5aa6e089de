//! Field descriptor resolution.
//!
//! Walks a record type's declared field table (expanding embedded sub-records depth-first,
//! in place) and produces the ordered column list for one [`Context`].

use crate::config::Naming;
use crate::error::{MapError, MapResult};
use crate::record::{FieldDef, FieldKind, RecordType};
use crate::tag::{Context, ContextSet, Tag};
use std::collections::HashSet;

/// Resolved metadata for one logical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column name.
    pub name: String,
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Field indices from the root record down to this field.
    pub path: Vec<usize>,
    /// Contexts the field is excluded from, including exclusions inherited from an
    /// enclosing embedded field.
    pub excluded: ContextSet,
    pub repeated: bool,
}

impl FieldDescriptor {
    pub fn includes(&self, context: Context) -> bool {
        !self.excluded.contains(context)
    }
}

/// All mapped fields of a record type, in declaration traversal order, before any
/// per-context filtering.
pub fn descriptors(record: &RecordType, naming: Naming) -> MapResult<Vec<FieldDescriptor>> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(record.fields, naming, &mut path, ContextSet::EMPTY, &mut out)?;
    Ok(out)
}

fn walk(
    fields: &'static [FieldDef],
    naming: Naming,
    path: &mut Vec<usize>,
    inherited: ContextSet,
    out: &mut Vec<FieldDescriptor>,
) -> MapResult<()> {
    for (index, def) in fields.iter().enumerate() {
        if !def.public {
            continue;
        }

        let tag = match def.tag {
            Some(raw) => Some(Tag::parse(raw)?),
            None => None,
        };
        if tag == Some(Tag::Skip) {
            continue;
        }
        let excluded = inherited.union(tag.as_ref().map(Tag::excluded).unwrap_or_default());

        path.push(index);
        match def.kind {
            FieldKind::Embedded(inner) => walk(inner(), naming, path, excluded, out)?,
            FieldKind::Scalar | FieldKind::Repeated => {
                let tag = match (tag, naming) {
                    (Some(tag), _) => Some(tag),
                    (None, Naming::Lenient) => Some(Tag::derived(def.ident)),
                    (None, Naming::Strict) => None,
                };
                if let Some(Tag::Column { name, .. }) = tag {
                    out.push(FieldDescriptor {
                        name,
                        ident: def.ident,
                        path: path.clone(),
                        excluded,
                        repeated: matches!(def.kind, FieldKind::Repeated),
                    });
                }
            }
        }
        path.pop();
    }
    Ok(())
}

/// The ordered columns of a record type for one context.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    record: &'static str,
    context: Context,
    naming: Naming,
    columns: Vec<FieldDescriptor>,
}

impl ColumnSet {
    /// Resolve the columns of `record` included in `context`.
    ///
    /// Fails with [`MapError::DuplicateColumn`] if two fields share a column name in this
    /// context.
    pub fn resolve(record: &RecordType, context: Context, naming: Naming) -> MapResult<Self> {
        let columns: Vec<_> = descriptors(record, naming)?
            .into_iter()
            .filter(|d| d.includes(context))
            .collect();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(MapError::DuplicateColumn {
                    record: record.name,
                    column: column.name.clone(),
                    context,
                });
            }
        }

        Ok(Self {
            record: record.name,
            context,
            naming,
            columns,
        })
    }

    pub fn record(&self) -> &'static str {
        self.record
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.columns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Comma-separated column list.
    pub fn to_sql_list(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    /// Find the field a returned column maps onto.
    ///
    /// An exact column-name match wins. Under [`Naming::Lenient`] a case-insensitive match on
    /// the column name or the Rust identifier is tried next; the first field in declaration
    /// order wins.
    pub fn find(&self, column: &str) -> Option<&FieldDescriptor> {
        if let Some(found) = self.columns.iter().find(|c| c.name == column) {
            return Some(found);
        }
        match self.naming {
            Naming::Strict => None,
            Naming::Lenient => self.columns.iter().find(|c| {
                c.name.eq_ignore_ascii_case(column) || c.ident.eq_ignore_ascii_case(column)
            }),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
