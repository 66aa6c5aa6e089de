//! Hand-written records shared by unit tests.
//!
//! These implement the record traits exactly the way `#[derive(Record)]` expands.

use crate::record::{FieldDef, FieldMut, FieldRef, Fields, Record};

/// Embedded into [`Account`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Audit {
    pub created_by: String,
    pub note: Option<String>,
}

impl Fields for Audit {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.created_by)),
            1 => Some(FieldRef::Scalar(&self.note)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.created_by)),
            1 => Some(FieldMut::Scalar(&mut self.note)),
            _ => None,
        }
    }
}

impl Record for Audit {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("created_by", None, true),
            FieldDef::scalar("note", Some("note/insert"), true),
        ];
        FIELDS
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub secret: String,
    pub internal: String,
    pub audit: Audit,
}

impl Fields for Account {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.id)),
            1 => Some(FieldRef::Scalar(&self.name)),
            2 => Some(FieldRef::Scalar(&self.email)),
            5 => Some(FieldRef::Embedded(&self.audit)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.id)),
            1 => Some(FieldMut::Scalar(&mut self.name)),
            2 => Some(FieldMut::Scalar(&mut self.email)),
            5 => Some(FieldMut::Embedded(&mut self.audit)),
            _ => None,
        }
    }
}

impl Record for Account {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("id", Some("id/insert/update"), true),
            FieldDef::scalar("name", None, true),
            FieldDef::scalar("email", Some("email"), true),
            // declared without `pub`
            FieldDef::scalar("secret", Some("secret"), false),
            FieldDef::scalar("internal", Some("-"), true),
            FieldDef::embedded("audit", None, true, <Audit as Record>::fields),
        ];
        FIELDS
    }
}

/// Mixed tagged and untagged columns: `a`, `b`, and `z` stored as `c`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub a: String,
    pub b: i32,
    pub z: String,
}

impl Fields for Sample {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Scalar(&self.b)),
            2 => Some(FieldRef::Scalar(&self.z)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Scalar(&mut self.b)),
            2 => Some(FieldMut::Scalar(&mut self.z)),
            _ => None,
        }
    }
}

impl Record for Sample {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("a", None, true),
            FieldDef::scalar("b", None, true),
            FieldDef::scalar("z", Some("c"), true),
        ];
        FIELDS
    }
}

/// One key column plus a repeated `gr` column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouped {
    pub a: String,
    pub group: Vec<String>,
}

impl Fields for Grouped {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Repeated(&self.group)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Repeated(&mut self.group)),
            _ => None,
        }
    }
}

impl Record for Grouped {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("a", None, true),
            FieldDef::repeated("group", Some("gr"), true),
        ];
        FIELDS
    }
}

/// Two fields sharing column `x`, and two sharing `y` in disjoint contexts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clash {
    pub first: i32,
    pub second: i32,
    pub third: i32,
    pub fourth: i32,
}

impl Fields for Clash {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.first)),
            1 => Some(FieldRef::Scalar(&self.second)),
            2 => Some(FieldRef::Scalar(&self.third)),
            3 => Some(FieldRef::Scalar(&self.fourth)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.first)),
            1 => Some(FieldMut::Scalar(&mut self.second)),
            2 => Some(FieldMut::Scalar(&mut self.third)),
            3 => Some(FieldMut::Scalar(&mut self.fourth)),
            _ => None,
        }
    }
}

impl Record for Clash {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("first", Some("x/update"), true),
            FieldDef::scalar("second", Some("x/update"), true),
            FieldDef::scalar("third", Some("y/insert"), true),
            FieldDef::scalar("fourth", Some("y/select,update"), true),
        ];
        FIELDS
    }
}

/// Embedded into [`Patch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchBase {
    pub a: String,
    pub b: Option<String>,
}

impl Fields for PatchBase {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Scalar(&self.a)),
            1 => Some(FieldRef::Scalar(&self.b)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Scalar(&mut self.a)),
            1 => Some(FieldMut::Scalar(&mut self.b)),
            _ => None,
        }
    }
}

impl Record for PatchBase {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::scalar("a", None, true),
            FieldDef::scalar("b", None, true),
        ];
        FIELDS
    }
}

/// Update payload with plain and optional columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    pub base: PatchBase,
    pub c: i32,
    pub d: Option<i32>,
    pub e: bool,
    pub f: Option<bool>,
    pub y: String,
    pub z: String,
}

impl Fields for Patch {
    fn field(&self, index: usize) -> Option<FieldRef<'_>> {
        match index {
            0 => Some(FieldRef::Embedded(&self.base)),
            1 => Some(FieldRef::Scalar(&self.c)),
            2 => Some(FieldRef::Scalar(&self.d)),
            3 => Some(FieldRef::Scalar(&self.e)),
            4 => Some(FieldRef::Scalar(&self.f)),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        match index {
            0 => Some(FieldMut::Embedded(&mut self.base)),
            1 => Some(FieldMut::Scalar(&mut self.c)),
            2 => Some(FieldMut::Scalar(&mut self.d)),
            3 => Some(FieldMut::Scalar(&mut self.e)),
            4 => Some(FieldMut::Scalar(&mut self.f)),
            _ => None,
        }
    }
}

impl Record for Patch {
    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::embedded("base", None, true, <PatchBase as Record>::fields),
            FieldDef::scalar("c", None, true),
            FieldDef::scalar("d", None, true),
            FieldDef::scalar("e", None, true),
            FieldDef::scalar("f", None, true),
            FieldDef::scalar("y", None, false),
            FieldDef::scalar("z", Some("-"), true),
        ];
        FIELDS
    }
}
