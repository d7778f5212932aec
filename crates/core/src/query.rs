//! Query parsing for the interactive list.
//!
//! A [`Query`] is rebuilt from scratch after every keystroke, so it is
//! immutable once parsed.

use crate::matcher::{find_match, MatchSpan};

/// A parsed search query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    cleaned: String,
    tokens: Vec<String>,
}

impl Query {
    /// Parses raw input into a query: trimmed, lowercased and split on
    /// whitespace into tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use fuzzdial_core::query::Query;
    ///
    /// let query = Query::parse("  Go  Build ");
    /// assert_eq!(query.cleaned(), "go  build");
    /// assert_eq!(query.tokens(), ["go", "build"]);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let cleaned = raw.trim().to_lowercase();
        let tokens = cleaned.split_whitespace().map(ToString::to_string).collect();

        Self {
            raw: raw.to_string(),
            cleaned,
            tokens,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when the cleaned query has nothing to match, which matches everything.
    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }

    /// Fuzzy matches the cleaned query against `source`.
    pub fn matches(&self, source: &str) -> Option<Vec<MatchSpan>> {
        find_match(&self.cleaned, source)
    }
}
