//! A single executable SQL statement produced by the splitter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One trimmed, non-empty unit of SQL, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    /// Wrap already-trimmed statement text.
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// Borrow the SQL text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the SQL text
    pub fn into_inner(self) -> String {
        self.0
    }

    /// True when the statement has no content besides whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// True when the statement opens with the keywords `DROP TABLE`.
    ///
    /// Keyword matching is case-insensitive and tolerates any whitespace
    /// between the two keywords. The table name may follow `TABLE` without
    /// whitespace when it is quoted (``DROP TABLE`users` ``), but an
    /// identifier such as `TABLESPACE` does not count.
    pub fn is_drop_table(&self) -> bool {
        let Some(rest) = strip_keyword(self.0.trim_start(), "drop") else {
            return false;
        };
        if !rest.starts_with(char::is_whitespace) {
            return false;
        }
        strip_keyword(rest.trim_start(), "table").is_some()
    }
}

/// Strip a leading keyword, provided the next character cannot continue
/// an unquoted identifier.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => None,
        _ => Some(rest),
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Statement {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Statement {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Statement {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
