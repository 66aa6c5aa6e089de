//! Table identifiers.
//!
//! Table names are spliced into statement text, never bound as parameters, so they are
//! parsed and validated first:
//!
//! - unquoted parts match `[A-Za-z_][A-Za-z0-9_$]*`
//! - quoted parts (`"Mixed Case"`) allow anything except NUL, with `""` as an escaped quote
//! - parts are joined with `.` (`schema.table`)

use crate::error::{MapError, MapResult};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Unquoted(String),
    Quoted(String),
}

/// A validated, possibly schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    parts: Vec<Part>,
}

impl Table {
    pub fn parse(s: &str) -> MapResult<Self> {
        if s.is_empty() {
            return Err(MapError::invalid_ident("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(MapError::invalid_ident("identifier cannot contain NUL"));
        }

        let mut chars = s.chars().peekable();
        let mut parts = vec![parse_part(&mut chars)?];
        while let Some(c) = chars.next() {
            if c != '.' {
                return Err(MapError::invalid_ident(format!(
                    "expected '.' between identifier parts, got '{c}'"
                )));
            }
            parts.push(parse_part(&mut chars)?);
        }

        Ok(Self { parts })
    }

    /// Render as SQL text.
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

fn parse_part(chars: &mut Peekable<Chars<'_>>) -> MapResult<Part> {
    if chars.next_if_eq(&'"').is_some() {
        let mut name = String::new();
        loop {
            match chars.next() {
                Some('"') if chars.next_if_eq(&'"').is_some() => name.push('"'),
                Some('"') => break,
                Some(c) => name.push(c),
                None => return Err(MapError::invalid_ident("unclosed quoted identifier")),
            }
        }
        if name.is_empty() {
            return Err(MapError::invalid_ident("empty quoted identifier"));
        }
        return Ok(Part::Quoted(name));
    }

    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' {
            break;
        }
        let valid = if name.is_empty() {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c == '$' || c.is_ascii_alphanumeric()
        };
        if !valid {
            return Err(MapError::invalid_ident(format!(
                "invalid character in identifier: '{c}'"
            )));
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        return Err(MapError::invalid_ident("empty identifier segment"));
    }
    Ok(Part::Unquoted(name))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match part {
                Part::Unquoted(s) => f.write_str(s)?,
                Part::Quoted(s) => write!(f, "\"{}\"", s.replace('"', "\"\""))?,
            }
        }
        Ok(())
    }
}

/// Convert an input into a [`Table`].
pub trait IntoTable {
    fn into_table(self) -> MapResult<Table>;
}

impl IntoTable for Table {
    fn into_table(self) -> MapResult<Table> {
        Ok(self)
    }
}

impl IntoTable for &Table {
    fn into_table(self) -> MapResult<Table> {
        Ok(self.clone())
    }
}

impl IntoTable for &str {
    fn into_table(self) -> MapResult<Table> {
        Table::parse(self)
    }
}

impl IntoTable for String {
    fn into_table(self) -> MapResult<Table> {
        Table::parse(&self)
    }
}
