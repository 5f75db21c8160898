//! Delimited token parsing.
//!
//! Template expression languages only pass strings, so multi-value arguments
//! arrive as one delimited string such as `"admin, editor"`. `TokenSplitter`
//! turns that string into tokens:
//!
//! - tokens are separated by `delimiter` (default `,`);
//! - whitespace around each token is trimmed;
//! - empty tokens are dropped, so `""`, `"  "` and `",,"` yield nothing;
//! - text between two `quote` characters (default `"`) is kept literally,
//!   delimiters included, and the quotes themselves are removed. This lets a
//!   permission expression such as `printer:print,query` travel as a single
//!   token: `"\"printer:print,query\", file:read"`.
//!
//! Inside a quoted group a doubled quote stands for one literal quote, so
//! `"say ""hi"""` yields `say "hi"`. An unterminated quote runs to the end of
//! the input.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{WardenError, WardenResult};

/// The delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// The quote character used when none is configured.
pub const DEFAULT_QUOTE: char = '"';

/// Splits delimited argument strings into tokens.
///
/// Deserializable from TOML; omitted fields fall back to the defaults:
///
/// ```toml
/// [tokens]
/// delimiter = ";"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSplitter {
    /// Separates one token from the next.
    pub delimiter: char,
    /// Groups text that must not be split.
    pub quote: char,
}

impl Default for TokenSplitter {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: DEFAULT_QUOTE,
        }
    }
}

impl TokenSplitter {
    /// A splitter with a custom delimiter and the default quote character.
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot split anything.
    ///
    /// Returns `WardenError::ConfigError` when the delimiter and the quote
    /// character are the same.
    pub fn validate(&self) -> WardenResult<()> {
        if self.delimiter == self.quote {
            return Err(WardenError::ConfigError {
                reason: format!(
                    "token delimiter '{}' must differ from the quote character",
                    self.delimiter
                ),
            });
        }
        Ok(())
    }

    /// Split `input` into trimmed, non-empty tokens in input order.
    ///
    /// Duplicates are kept; "any" queries evaluate this sequence in order.
    pub fn split(&self, input: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c == self.quote {
                if quoted && chars.peek() == Some(&self.quote) {
                    chars.next();
                    current.push(c);
                } else {
                    quoted = !quoted;
                }
            } else if c == self.delimiter && !quoted {
                push_token(&mut tokens, &current);
                current.clear();
            } else {
                current.push(c);
            }
        }
        push_token(&mut tokens, &current);

        tokens
    }

    /// Split `input` into a set of tokens, for "all" queries.
    pub fn split_to_set(&self, input: &str) -> BTreeSet<String> {
        self.split(input).into_iter().collect()
    }
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let token = raw.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
}
