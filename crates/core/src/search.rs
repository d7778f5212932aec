//! Searching a catalog of command definitions.
//!
//! [`CommandCatalog`] is the [`Corpus`] the `dial` binary hands to the
//! interactive list. It supports two modes:
//!
//! - **Fuzzy** (default): chunked fuzzy matching on the invocation and the
//!   description, ranked by how few chunks the best field needed.
//! - **Regex**: the query is a case-insensitive regular expression. Patterns
//!   that do not compile are reported as [`Error::InvalidQuery`].

use itertools::Itertools;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::command_definitions::CommandDefinition;
use crate::corpus::{Corpus, DisplayField, ListItem};
use crate::error::{Error, Result};
use crate::matcher::MatchSpan;
use crate::query::Query;

/// How the catalog interprets a query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    Fuzzy,
    Regex,
}

/// An in-memory collection of commands.
#[derive(Clone, Debug)]
pub struct CommandCatalog {
    commands: Vec<CommandDefinition>,
    mode: SearchMode,
}

/// True when every byte of `token` appears in `haystack` in order.
fn is_subsequence(token: &str, haystack: &[u8]) -> bool {
    let mut remaining = haystack.iter();
    token
        .bytes()
        .all(|needle| remaining.by_ref().any(|&byte| byte == needle))
}

fn fuzzy_field(query: &Query, content: &str) -> Option<Vec<MatchSpan>> {
    let lowered = content.to_ascii_lowercase();
    if !query
        .tokens()
        .iter()
        .all(|token| is_subsequence(token, lowered.as_bytes()))
    {
        return None;
    }

    query.matches(content)
}

fn regex_field(pattern: &Regex, content: &str) -> Option<Vec<MatchSpan>> {
    let spans: Vec<MatchSpan> = pattern
        .find_iter(content)
        .filter(|found| !found.is_empty())
        .map(|found| MatchSpan::new(found.start(), found.len()))
        .collect();

    (!spans.is_empty()).then_some(spans)
}

impl CommandCatalog {
    pub fn new(commands: Vec<CommandDefinition>, mode: SearchMode) -> Self {
        Self { commands, mode }
    }

    fn to_item(
        command: &CommandDefinition,
        invocation_spans: Option<Vec<MatchSpan>>,
        description_spans: Option<Vec<MatchSpan>>,
    ) -> ListItem<CommandDefinition> {
        let mut fields = vec![DisplayField::new(
            command.invocation.clone(),
            invocation_spans.unwrap_or_default(),
        )];

        if let Some(description) = &command.description {
            fields.push(DisplayField::new(
                description.clone(),
                description_spans.unwrap_or_default(),
            ));
        }

        ListItem::new(fields, command.clone())
    }

    fn fuzzy_search(&self, query: &Query) -> Vec<ListItem<CommandDefinition>> {
        self.commands
            .iter()
            .enumerate()
            .filter_map(|(position, command)| {
                let invocation_spans = fuzzy_field(query, &command.invocation);
                let description_spans = command
                    .description
                    .as_deref()
                    .and_then(|description| fuzzy_field(query, description));

                let chunks = [&invocation_spans, &description_spans]
                    .into_iter()
                    .flatten()
                    .map(Vec::len)
                    .min()?;

                Some((
                    (chunks, position),
                    Self::to_item(command, invocation_spans, description_spans),
                ))
            })
            .sorted_by_key(|(rank, _)| *rank)
            .map(|(_, item)| item)
            .collect()
    }

    fn regex_search(&self, query: &Query) -> Result<Vec<ListItem<CommandDefinition>>> {
        let pattern = query.raw().trim();
        if pattern.is_empty() {
            return Ok(self
                .commands
                .iter()
                .map(|command| Self::to_item(command, None, None))
                .collect());
        }

        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidQuery(e.to_string()))?;

        Ok(self
            .commands
            .iter()
            .filter_map(|command| {
                let invocation_spans = regex_field(&pattern, &command.invocation);
                let description_spans = command
                    .description
                    .as_deref()
                    .and_then(|description| regex_field(&pattern, description));

                if invocation_spans.is_none() && description_spans.is_none() {
                    return None;
                }

                Some(Self::to_item(command, invocation_spans, description_spans))
            })
            .collect())
    }
}

impl Corpus for CommandCatalog {
    type Payload = CommandDefinition;

    fn search(&self, query: &Query) -> Result<Vec<ListItem<CommandDefinition>>> {
        let items = match self.mode {
            SearchMode::Fuzzy => self.fuzzy_search(query),
            SearchMode::Regex => self.regex_search(query)?,
        };

        debug!(
            "Query `{}` matched {} of {} commands",
            query.raw(),
            items.len(),
            self.commands.len()
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(mode: SearchMode) -> CommandCatalog {
        CommandCatalog::new(
            vec![
                CommandDefinition::new("go run github.com/acme/tool", Some("Run the tool")),
                CommandDefinition::new("kubectl show pods", None),
                CommandDefinition::new("git push", Some("Push changes")),
                CommandDefinition::new("go build", Some("Build the module")),
            ],
            mode,
        )
    }

    fn invocations(items: &[ListItem<CommandDefinition>]) -> Vec<&str> {
        items
            .iter()
            .map(|item| item.payload.invocation.as_str())
            .collect()
    }

    #[test]
    fn test_is_subsequence() {
        assert!(is_subsequence("gps", b"git push"));
        assert!(is_subsequence("", b"anything"));
        assert!(!is_subsequence("pg", b"git push"));
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let items = catalog(SearchMode::Fuzzy).search(&Query::parse("")).unwrap();
        assert_eq!(
            invocations(&items),
            vec![
                "go run github.com/acme/tool",
                "kubectl show pods",
                "git push",
                "go build"
            ]
        );
        assert!(items
            .iter()
            .all(|item| item.fields.iter().all(|f| f.highlights.is_empty())));
    }

    #[test]
    fn test_fuzzy_keeps_catalog_order_on_ties() {
        let items = catalog(SearchMode::Fuzzy).search(&Query::parse("go")).unwrap();
        assert_eq!(
            invocations(&items),
            vec!["go run github.com/acme/tool", "go build"]
        );
        assert_eq!(items[1].fields[0].highlights, vec![MatchSpan::new(0, 2)]);
    }

    #[test]
    fn test_fuzzy_ranks_fewer_chunks_first() {
        let items = catalog(SearchMode::Fuzzy).search(&Query::parse("ui")).unwrap();
        assert_eq!(
            invocations(&items),
            vec!["go build", "go run github.com/acme/tool"]
        );
        assert_eq!(
            items[1].fields[0].highlights,
            vec![MatchSpan::new(4, 1), MatchSpan::new(8, 1)]
        );
    }

    #[test]
    fn test_fuzzy_matches_description() {
        let items = catalog(SearchMode::Fuzzy)
            .search(&Query::parse("changes"))
            .unwrap();
        assert_eq!(invocations(&items), vec!["git push"]);
        assert!(items[0].fields[0].highlights.is_empty());
        assert_eq!(items[0].fields[1].highlights, vec![MatchSpan::new(5, 7)]);
    }

    #[test]
    fn test_fuzzy_split_match_is_ranked_after_contiguous_match() {
        let items = catalog(SearchMode::Fuzzy)
            .search(&Query::parse("gobuild"))
            .unwrap();
        assert_eq!(invocations(&items), vec!["go build"]);
        assert_eq!(
            items[0].fields[0].highlights,
            vec![MatchSpan::new(0, 2), MatchSpan::new(3, 5)]
        );
    }

    #[test]
    fn test_fuzzy_no_match() {
        let items = catalog(SearchMode::Fuzzy)
            .search(&Query::parse("terraform"))
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_regex_highlights_every_match() {
        let items = catalog(SearchMode::Regex)
            .search(&Query::parse("^go (run|build)"))
            .unwrap();
        assert_eq!(
            invocations(&items),
            vec!["go run github.com/acme/tool", "go build"]
        );
        assert_eq!(items[0].fields[0].highlights, vec![MatchSpan::new(0, 6)]);
    }

    #[test]
    fn test_regex_is_case_insensitive() {
        let items = catalog(SearchMode::Regex)
            .search(&Query::parse("PUSH"))
            .unwrap();
        assert_eq!(invocations(&items), vec!["git push"]);
        assert_eq!(items[0].fields[1].highlights, vec![MatchSpan::new(0, 4)]);
    }

    #[test]
    fn test_regex_invalid_pattern() {
        let result = catalog(SearchMode::Regex).search(&Query::parse("go (run"));
        assert!(matches!(result, Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn test_regex_empty_pattern_returns_everything() {
        let items = catalog(SearchMode::Regex).search(&Query::parse("  ")).unwrap();
        assert_eq!(items.len(), 4);
    }
}
