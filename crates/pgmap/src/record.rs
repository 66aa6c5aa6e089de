//! Record model: a static field table per record type plus dyn-compatible field access.
//!
//! A record type describes its declared fields once ([`FieldDef`]) and exposes them by
//! index through [`Fields`]. Embedded sub-records are reached through nested indices, so an
//! access path such as `[2, 0]` means "field 0 of the record embedded at field 2".
//!
//! These traits are normally implemented by `#[derive(Record)]`.

use crate::error::{MapError, MapResult};
use crate::value::{SqlValue, ToValue, Value, ValueError};
use std::any::TypeId;

/// What a declared field holds.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single column value.
    Scalar,
    /// A sequence aggregated from several rows.
    Repeated,
    /// A sub-record whose fields are expanded in place.
    Embedded(fn() -> &'static [FieldDef]),
}

/// One declared field of a record type.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Rust identifier of the field.
    pub ident: &'static str,
    /// Raw annotation, if any.
    pub tag: Option<&'static str>,
    /// Whether the field is `pub`. Non-public fields are never mapped.
    pub public: bool,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn scalar(ident: &'static str, tag: Option<&'static str>, public: bool) -> Self {
        Self {
            ident,
            tag,
            public,
            kind: FieldKind::Scalar,
        }
    }

    pub const fn repeated(ident: &'static str, tag: Option<&'static str>, public: bool) -> Self {
        Self {
            ident,
            tag,
            public,
            kind: FieldKind::Repeated,
        }
    }

    pub const fn embedded(
        ident: &'static str,
        tag: Option<&'static str>,
        public: bool,
        fields: fn() -> &'static [FieldDef],
    ) -> Self {
        Self {
            ident,
            tag,
            public,
            kind: FieldKind::Embedded(fields),
        }
    }
}

/// A scalar field slot.
pub trait Field {
    fn value(&self) -> Value;
    fn is_zero(&self) -> bool;
    fn assign(&mut self, value: Value) -> Result<(), ValueError>;
}

impl<T: SqlValue> Field for T {
    fn value(&self) -> Value {
        self.to_value()
    }

    fn is_zero(&self) -> bool {
        ToValue::is_zero(self)
    }

    fn assign(&mut self, value: Value) -> Result<(), ValueError> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// A repeated field slot: values are appended, never compared.
pub trait RepeatedField {
    /// All elements as one array value.
    fn values(&self) -> Value;
    fn is_empty(&self) -> bool;
    fn push_value(&mut self, value: Value) -> Result<(), ValueError>;
}

impl<T: SqlValue> RepeatedField for Vec<T> {
    fn values(&self) -> Value {
        Value::Array(self.iter().map(|v| v.to_value()).collect())
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    fn push_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            // An array column (a bound repeated field, `array_agg`) spreads into the slot.
            Value::Array(items) => {
                let items = items
                    .into_iter()
                    .filter(|v| !v.is_null())
                    .map(T::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                self.extend(items);
            }
            Value::Null => {}
            value => self.push(T::from_value(value)?),
        }
        Ok(())
    }
}

/// Shared access to one field.
pub enum FieldRef<'a> {
    Scalar(&'a dyn Field),
    Repeated(&'a dyn RepeatedField),
    Embedded(&'a dyn Fields),
}

/// Mutable access to one field.
pub enum FieldMut<'a> {
    Scalar(&'a mut dyn Field),
    Repeated(&'a mut dyn RepeatedField),
    Embedded(&'a mut dyn Fields),
}

impl FieldRef<'_> {
    /// The field's value as a statement argument.
    pub fn value(&self) -> Value {
        match self {
            FieldRef::Scalar(f) => f.value(),
            FieldRef::Repeated(f) => f.values(),
            FieldRef::Embedded(_) => Value::Null,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            FieldRef::Scalar(f) => f.is_zero(),
            FieldRef::Repeated(f) => f.is_empty(),
            FieldRef::Embedded(_) => false,
        }
    }
}

/// Index-based access to the declared fields of a record value.
///
/// Indices follow the order of [`Record::fields`]. Returns `None` for fields that are
/// never mapped (non-public or tagged `-`).
pub trait Fields {
    fn field(&self, index: usize) -> Option<FieldRef<'_>>;
    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

/// A mapped record type.
pub trait Record: Fields + 'static {
    /// The declared field table, in declaration order.
    fn fields() -> &'static [FieldDef];
}

/// Identity and field table of a record type.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub id: TypeId,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl RecordType {
    pub fn of<R: Record>() -> Self {
        Self {
            id: TypeId::of::<R>(),
            name: std::any::type_name::<R>(),
            fields: R::fields(),
        }
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}

/// A record value whose concrete type is only known at runtime.
pub trait AnyRecord: Fields {
    fn record_type(&self) -> RecordType;
}

impl<R: Record> AnyRecord for R {
    fn record_type(&self) -> RecordType {
        RecordType::of::<R>()
    }
}

/// Follow an access path to a field.
pub fn field_at<'a, F: Fields + ?Sized>(fields: &'a F, path: &[usize]) -> Option<FieldRef<'a>> {
    match path {
        [] => None,
        [index] => fields.field(*index),
        [index, rest @ ..] => match fields.field(*index)? {
            FieldRef::Embedded(inner) => field_at(inner, rest),
            _ => None,
        },
    }
}

/// Follow an access path to a field, mutably.
pub fn field_at_mut<'a, F: Fields + ?Sized>(
    fields: &'a mut F,
    path: &[usize],
) -> Option<FieldMut<'a>> {
    match path {
        [] => None,
        [index] => fields.field_mut(*index),
        [index, rest @ ..] => match fields.field_mut(*index)? {
            FieldMut::Embedded(inner) => field_at_mut(inner, rest),
            _ => None,
        },
    }
}

pub(crate) fn read_field<'a, F: Fields + ?Sized>(
    fields: &'a F,
    path: &[usize],
    column: &str,
) -> MapResult<FieldRef<'a>> {
    field_at(fields, path).ok_or_else(|| {
        MapError::InvalidDestination(format!("no readable field at {path:?} for column {column}"))
    })
}

pub(crate) fn write_field<'a, F: Fields + ?Sized>(
    fields: &'a mut F,
    path: &[usize],
    column: &str,
) -> MapResult<FieldMut<'a>> {
    field_at_mut(fields, path).ok_or_else(|| {
        MapError::InvalidDestination(format!("no writable field at {path:?} for column {column}"))
    })
}
