//! Field annotation grammar.
//!
//! Every mapped field may carry one annotation string:
//!
//! - `name` - the field maps to column `name` in every context
//! - `name/insert/update` (or `name/insert,update`) - the field maps to `name`, except in
//!   the listed contexts where it is excluded
//! - `-` - the field is never mapped
//!
//! Context names are matched case-insensitively.

use crate::error::{MapError, MapResult};
use std::fmt;
use std::str::FromStr;

/// The statement kind a column list is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Context {
    Insert,
    Update,
    Select,
}

impl Context {
    pub const ALL: [Context; 3] = [Context::Insert, Context::Update, Context::Select];

    pub fn as_str(self) -> &'static str {
        match self {
            Context::Insert => "insert",
            Context::Update => "update",
            Context::Select => "select",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Context::Insert => 0b001,
            Context::Update => 0b010,
            Context::Select => 0b100,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Context {
    type Err = MapError;

    fn from_str(s: &str) -> MapResult<Self> {
        Context::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MapError::invalid_tag(s, format!("unknown context '{s}'")))
    }
}

/// A small set of [`Context`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ContextSet(u8);

impl ContextSet {
    pub const EMPTY: ContextSet = ContextSet(0);
    pub const ALL: ContextSet = ContextSet(0b111);

    pub fn contains(self, context: Context) -> bool {
        self.0 & context.bit() != 0
    }

    pub fn insert(&mut self, context: Context) {
        self.0 |= context.bit();
    }

    pub fn union(self, other: ContextSet) -> ContextSet {
        ContextSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Context> for ContextSet {
    fn from_iter<I: IntoIterator<Item = Context>>(iter: I) -> Self {
        let mut set = ContextSet::EMPTY;
        for context in iter {
            set.insert(context);
        }
        set
    }
}

/// A parsed field annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `-`: excluded from every context.
    Skip,
    /// A column name plus the contexts it is excluded from.
    Column { name: String, excluded: ContextSet },
}

impl Tag {
    /// Parse an annotation string.
    pub fn parse(tag: &str) -> MapResult<Tag> {
        if tag == "-" {
            return Ok(Tag::Skip);
        }

        let mut parts = tag.split('/');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(MapError::invalid_tag(tag, "empty column name"));
        }
        if name == "-" {
            return Err(MapError::invalid_tag(
                tag,
                "'-' excludes every context and takes no context list",
            ));
        }

        let mut excluded = ContextSet::EMPTY;
        for part in parts.flat_map(|p| p.split(',')) {
            let part = part.trim();
            if part.is_empty() {
                return Err(MapError::invalid_tag(tag, "empty context name"));
            }
            let context = part
                .parse::<Context>()
                .map_err(|_| MapError::invalid_tag(tag, format!("unknown context '{part}'")))?;
            excluded.insert(context);
        }

        Ok(Tag::Column {
            name: name.to_string(),
            excluded,
        })
    }

    /// A column tag derived from a field identifier, included everywhere.
    pub fn derived(ident: &str) -> Tag {
        Tag::Column {
            name: ident.to_lowercase(),
            excluded: ContextSet::EMPTY,
        }
    }

    /// The contexts this tag excludes.
    pub fn excluded(&self) -> ContextSet {
        match self {
            Tag::Skip => ContextSet::ALL,
            Tag::Column { excluded, .. } => *excluded,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Tag::Skip => None,
            Tag::Column { name, .. } => Some(name),
        }
    }
}
