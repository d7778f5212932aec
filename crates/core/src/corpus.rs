//! The contract between the interactive list and whatever it searches.

use crate::error::Result;
use crate::matcher::MatchSpan;
use crate::query::Query;

/// One piece of text shown for a list item, with the runs to highlight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayField {
    pub content: String,
    pub highlights: Vec<MatchSpan>,
}

impl DisplayField {
    pub fn new(content: impl Into<String>, highlights: Vec<MatchSpan>) -> Self {
        Self {
            content: content.into(),
            highlights,
        }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, Vec::new())
    }
}

/// A search result: the fields to display and the payload handed back to the
/// caller when the item is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem<P> {
    pub fields: Vec<DisplayField>,
    pub payload: P,
}

impl<P> ListItem<P> {
    pub fn new(fields: Vec<DisplayField>, payload: P) -> Self {
        Self { fields, payload }
    }
}

/// A searchable collection of items.
pub trait Corpus {
    type Payload;

    /// Returns the ranked items matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::InvalidQuery`] when the query cannot be
    /// used by this corpus. The list keeps showing its previous results in that
    /// case; any other error ends the list.
    fn search(&self, query: &Query) -> Result<Vec<ListItem<Self::Payload>>>;
}
