//! Positional placeholder renumbering.
//!
//! When two independently numbered fragments are joined into one statement, the second
//! fragment's `$N` markers must be shifted past the first fragment's arguments:
//!
//! ```
//! use pgmap::reindex;
//!
//! assert_eq!(reindex("a = $1 and b = $2", 5), "a = $6 and b = $7");
//! assert_eq!(reindex("cost = '$200'", 5), "cost = '$200'");
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    /// After a `$`; `start` is the byte offset of the first digit.
    InParameter { start: usize },
    InDoubleQuote,
    InDoubleQuoteEscape,
    InSingleQuote,
    InSingleQuoteEscape,
}

/// Shift every `$N` marker outside quoted literals by `offset`.
///
/// A `$` without digits is copied unchanged, as is anything inside `'...'` or `"..."`.
/// A backslash inside quotes escapes exactly one character. A digit run too large for
/// `usize` is left as written.
pub fn reindex(sql: &str, offset: usize) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut state = State::Default;

    for (i, c) in sql.char_indices() {
        if let State::InParameter { start } = state {
            if c.is_ascii_digit() {
                continue;
            }
            push_parameter(&mut out, &sql[start..i], offset);
            state = State::Default;
        }

        state = match state {
            State::Default | State::InParameter { .. } => match c {
                '$' => State::InParameter { start: i + 1 },
                '\'' => State::InSingleQuote,
                '"' => State::InDoubleQuote,
                _ => State::Default,
            },
            State::InDoubleQuote => match c {
                '\\' => State::InDoubleQuoteEscape,
                '"' => State::Default,
                _ => State::InDoubleQuote,
            },
            State::InDoubleQuoteEscape => State::InDoubleQuote,
            State::InSingleQuote => match c {
                '\\' => State::InSingleQuoteEscape,
                '\'' => State::Default,
                _ => State::InSingleQuote,
            },
            State::InSingleQuoteEscape => State::InSingleQuote,
        };

        // The marker itself is written once its digits are known.
        if !matches!(state, State::InParameter { .. }) {
            out.push(c);
        }
    }

    if let State::InParameter { start } = state {
        push_parameter(&mut out, &sql[start..], offset);
    }
    out
}

fn push_parameter(out: &mut String, digits: &str, offset: usize) {
    out.push('$');
    if digits.is_empty() {
        return;
    }
    match digits
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_add(offset))
    {
        Some(n) => out.push_str(&n.to_string()),
        None => out.push_str(digits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_markers() {
        assert_eq!(
            reindex("where a = $1 and b = $2", 10),
            "where a = $11 and b = $12"
        );
    }

    #[test]
    fn zero_offset_is_identity() {
        for s in [
            "",
            "select 1",
            "where a = $1 and b = $2",
            "where a = $",
            "$1$2$",
            r#"where x = 'it\'s $3' and y = "say \"$4\"" and z = $5"#,
            "héllo = $7 ünd",
        ] {
            assert_eq!(reindex(s, 0), s);
        }
    }

    #[test]
    fn double_quoted_markers_untouched() {
        assert_eq!(
            reindex(r#"where cost = "$200""#, 5),
            r#"where cost = "$200""#
        );
    }

    #[test]
    fn single_quoted_markers_untouched() {
        assert_eq!(
            reindex("where cost = '$200' and id = $1", 5),
            "where cost = '$200' and id = $6"
        );
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        assert_eq!(
            reindex(r"where a = 'it\'s $1' and b = $1", 2),
            r"where a = 'it\'s $1' and b = $3"
        );
        assert_eq!(
            reindex(r#"where a = "\"$1" and b = $1"#, 2),
            r#"where a = "\"$1" and b = $3"#
        );
    }

    #[test]
    fn doubled_quote_reopens_string() {
        assert_eq!(
            reindex("where a = 'it''s $1' and b = $1", 1),
            "where a = 'it''s $1' and b = $2"
        );
    }

    #[test]
    fn bare_marker_passes_through() {
        assert_eq!(reindex("a = $ and b = $1", 3), "a = $ and b = $4");
        assert_eq!(reindex("$$", 3), "$$");
        assert_eq!(reindex("$", 3), "$");
    }

    #[test]
    fn terminator_is_reprocessed() {
        assert_eq!(reindex("$1'$2'", 1), "$2'$2'");
        assert_eq!(reindex("($1,$2)", 1), "($2,$3)");
        assert_eq!(reindex("$1$2", 1), "$2$3");
    }

    #[test]
    fn marker_at_end_of_input() {
        assert_eq!(reindex("id = $9", 1), "id = $10");
    }

    #[test]
    fn overflowing_digits_left_alone() {
        let s = "id = $99999999999999999999999999";
        assert_eq!(reindex(s, 1), s);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        assert_eq!(reindex("名前 = $1", 1), "名前 = $2");
    }
}
