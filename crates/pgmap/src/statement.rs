//! Parameterized statements.

use crate::reindex::reindex;
use crate::value::{ToValue, Value};
use tokio_postgres::types::ToSql;

/// Statement text with 1-based `$N` placeholders and its ordered arguments.
///
/// Fragments built independently (each numbering from `$1`) are joined with
/// [`Statement::append`], which shifts the appended fragment's placeholders past the
/// arguments already held:
///
/// ```
/// use pgmap::Statement;
///
/// let mut stmt = Statement::new("select * from users where org = $1").bind(7);
/// stmt.append(Statement::new(" and name = $1").bind("alice"));
///
/// assert_eq!(stmt.sql(), "select * from users where org = $1 and name = $2");
/// assert_eq!(stmt.args().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Statement {
    sql: String,
    args: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Build from text and arguments already numbered to match.
    pub fn with_args(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Add the argument for the next placeholder already present in the text.
    pub fn bind(mut self, value: impl ToValue) -> Self {
        self.args.push(value.to_value());
        self
    }

    /// Append raw text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a fresh `$N` placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl ToValue) -> &mut Self {
        self.args.push(value.to_value());
        self.sql.push('$');
        self.sql.push_str(&self.args.len().to_string());
        self
    }

    /// Append another statement, renumbering its placeholders after this one's arguments.
    pub fn append(&mut self, other: Statement) -> &mut Self {
        let offset = self.args.len();
        self.sql.push_str(&reindex(&other.sql, offset));
        self.args.extend(other.args);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Whether the text is empty or only whitespace.
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.args)
    }

    /// Arguments as `tokio-postgres` parameters.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        params_ref(&self.args)
    }
}

pub(crate) fn params_ref(args: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

impl From<&str> for Statement {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for Statement {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_bind_numbers_sequentially() {
        let mut stmt = Statement::new("update t set a = ");
        stmt.push_bind(1).push(", b = ").push_bind("x");
        assert_eq!(stmt.sql(), "update t set a = $1, b = $2");
        assert_eq!(stmt.args(), [Value::Int(1), Value::Text("x".into())]);
        assert_eq!(stmt.params_ref().len(), 2);
    }

    #[test]
    fn append_shifts_fragment() {
        let mut stmt = Statement::new("a = $1 and b = $2").bind(1).bind(2);
        stmt.append(Statement::new(" and c = $1 and d = '$1'").bind(3));
        assert_eq!(stmt.sql(), "a = $1 and b = $2 and c = $3 and d = '$1'");
        assert_eq!(
            stmt.args(),
            [Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn append_to_empty_keeps_numbering() {
        let mut stmt = Statement::default();
        stmt.append(Statement::new("id = $1").bind(9_i64));
        assert_eq!(stmt.sql(), "id = $1");
        assert_eq!(stmt.args(), [Value::Int(9)]);
    }

    #[test]
    fn blank_text_is_empty() {
        assert!(Statement::new("").is_empty());
        assert!(Statement::new("  \n").is_empty());
        assert!(!Statement::from("id = 1").is_empty());
    }

    #[test]
    fn none_binds_null() {
        let stmt = Statement::new("x = $1").bind(None::<i32>);
        assert_eq!(stmt.args(), [Value::Null]);
    }
}
