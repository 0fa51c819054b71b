//! Delimiter-aware SQL script splitting
//!
//! Migration scripts may switch the statement terminator with a
//! `DELIMITER <token>` line so that routine bodies (triggers, procedures)
//! can contain semicolons. The splitter consumes those directives and
//! rewrites the custom terminator back to `;`, so every statement it
//! returns can be handed to the driver as-is.
//!
//! Known limitation: the rewrite replaces every occurrence of the active
//! delimiter in the buffered text, including occurrences inside string
//! literals and comments.
//!
//! Comments are kept as part of the statement that follows them. A
//! `DROP TABLE` preceded by a comment line (`-- reset\nDROP TABLE t;`)
//! therefore does not start with `DROP TABLE` and is not skipped in
//! additive mode. A comment placed after the previous statement's
//! terminator, on the same line, stays with that statement instead.

use crate::statement::Statement;

const DEFAULT_DELIMITER: &str = ";";
const DIRECTIVE_KEYWORD: &str = "DELIMITER";

/// Transient state while splitting one script.
struct DelimiterState {
    delimiter: String,
    buffer: String,
    statements: Vec<Statement>,
}

impl DelimiterState {
    fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            buffer: String::new(),
            statements: Vec::new(),
        }
    }

    /// Emit the buffered text as a statement if it holds anything.
    fn flush(&mut self) {
        let trimmed = self.buffer.trim();
        if !trimmed.is_empty() {
            self.statements.push(Statement::new(trimmed));
        }
        self.buffer.clear();
    }

    fn switch_delimiter(&mut self, token: &str) {
        self.flush();
        self.delimiter = token.to_string();
    }

    fn push_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');

        if self.buffer.contains(self.delimiter.as_str()) {
            if self.delimiter != DEFAULT_DELIMITER {
                self.buffer = self.buffer.replace(self.delimiter.as_str(), DEFAULT_DELIMITER);
            }
            self.flush();
        }
    }

    fn finish(mut self) -> Vec<Statement> {
        self.flush();
        self.statements
    }
}

/// Parse a `DELIMITER <token>` directive line, returning the new token.
///
/// The keyword is matched case-insensitively after leading whitespace and
/// must be followed by whitespace. A bare keyword without a token is not a
/// directive.
fn parse_delimiter_directive(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let keyword = line.get(..DIRECTIVE_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(DIRECTIVE_KEYWORD) {
        return None;
    }

    let rest = &line[DIRECTIVE_KEYWORD.len()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()
}

/// Split raw script text into executable statements.
///
/// Lines accumulate until the active delimiter appears anywhere in the
/// accumulated text; the whole buffer is then emitted as one statement with
/// the delimiter rewritten to `;`. Directive lines never appear in the
/// output, and blank statements are never emitted.
///
/// # Examples
/// ```
/// use mr_core::split_statements;
/// let stmts = split_statements("DELIMITER $$\nSTMT1$$\nDELIMITER ;\nSTMT2;\n");
/// assert_eq!(stmts, vec!["STMT1;", "STMT2;"]);
/// ```
pub fn split_statements(text: &str) -> Vec<Statement> {
    let mut state = DelimiterState::new();

    for line in text.lines() {
        match parse_delimiter_directive(line) {
            Some(token) => state.switch_delimiter(token),
            None => state.push_line(line),
        }
    }

    state.finish()
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
