//! Fuzzy matching of a query against a single source string.
//!
//! A match aligns every byte of the query, in order, against the lowercased
//! source. The aligned bytes form contiguous runs ("chunks"); the matcher
//! returns the alignment with the fewest chunks, preferring the
//! lexicographically smallest chunk starts when several alignments tie.
//!
//! The objective is chunk count alone. A split that lands on a word boundary
//! is not preferred over one that does not, so results for queries spanning
//! several words can still look arbitrary to a reader.

use std::cmp::Ordering;

/// A highlighted run inside a source string, in bytes of the original text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub length: usize,
}

impl MatchSpan {
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// One past the last byte covered by this span.
    pub const fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A partial alignment of a query prefix against a source prefix.
#[derive(Clone, Debug)]
struct Alignment {
    spans: Vec<MatchSpan>,
}

impl Alignment {
    fn starting_at(position: usize) -> Self {
        Self {
            spans: vec![MatchSpan::new(position, 1)],
        }
    }

    /// Matches one more query byte at `position`, extending the last chunk
    /// when it is adjacent.
    fn push(&self, position: usize) -> Self {
        let mut spans = self.spans.clone();
        match spans.last_mut() {
            Some(last) if last.end() == position => last.length += 1,
            _ => spans.push(MatchSpan::new(position, 1)),
        }
        Self { spans }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.spans.len().cmp(&other.spans.len()).then_with(|| {
            self.spans
                .iter()
                .map(|span| span.start)
                .cmp(other.spans.iter().map(|span| span.start))
        })
    }
}

/// Keeps the better of two candidates, favouring `current` on a full tie.
fn better(current: Option<Alignment>, candidate: Option<Alignment>) -> Option<Alignment> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => {
            if candidate.compare(&current) == Ordering::Less {
                Some(candidate)
            } else {
                Some(current)
            }
        }
        (current, None) => current,
        (None, candidate) => candidate,
    }
}

/// Finds `query` inside `source` as a minimal sequence of chunks.
///
/// `query` is expected to be cleaned already (see [`crate::query::Query`]);
/// the source is lowercased here so the returned spans index into the
/// original `source`. An empty query is a vacuous match with no spans.
///
/// Returns `None` when the query is longer than the source or when its
/// characters do not appear in order.
///
/// # Examples
///
/// ```
/// use fuzzdial_core::matcher::{find_match, MatchSpan};
///
/// let spans = find_match("run hub", "go run github.com");
/// assert_eq!(spans, Some(vec![MatchSpan::new(3, 4), MatchSpan::new(10, 3)]));
/// ```
#[must_use]
pub fn find_match(query: &str, source: &str) -> Option<Vec<MatchSpan>> {
    let query = query.as_bytes();
    if query.is_empty() {
        return Some(Vec::new());
    }

    let source = source.to_ascii_lowercase().into_bytes();
    if query.len() > source.len() {
        return None;
    }

    // Row `i` of the grid, kept only for the previous source position:
    // `ending[j]` is the best alignment of query[..=j] whose last byte sits at
    // source[i], `best[j]` the best alignment of query[..=j] within source[..=i].
    let mut ending: Vec<Option<Alignment>> = vec![None; query.len()];
    let mut best: Vec<Option<Alignment>> = vec![None; query.len()];

    for (i, &source_byte) in source.iter().enumerate() {
        let mut next_ending: Vec<Option<Alignment>> = vec![None; query.len()];
        let mut next_best: Vec<Option<Alignment>> = vec![None; query.len()];

        for (j, &query_byte) in query.iter().enumerate().take(i + 1) {
            if source_byte == query_byte {
                next_ending[j] = if j == 0 {
                    Some(Alignment::starting_at(i))
                } else {
                    let extended = ending[j - 1].as_ref().map(|a| a.push(i));
                    let opened = best[j - 1].as_ref().map(|a| a.push(i));
                    better(extended, opened)
                };
            }

            next_best[j] = better(best[j].clone(), next_ending[j].clone());
        }

        ending = next_ending;
        best = next_best;
    }

    best.pop().flatten().map(|alignment| alignment.spans)
}
