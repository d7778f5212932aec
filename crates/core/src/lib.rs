//! Fuzzdial Core Library
//!
//! This crate provides the core functionality for fuzzdial, an interactive
//! fuzzy finder for saved shell commands: query parsing, the chunked fuzzy
//! matcher, the contract between the interactive list and what it searches,
//! and the command catalog that implements that contract.
//!
//! # Key Features
//!
//! - **Query Parsing**: Normalize typed input into a comparable form
//! - **Fuzzy Matching**: Locate a query as the fewest contiguous chunks of a string
//! - **Corpus Contract**: Ranked, highlighted list items with opaque payloads
//! - **Command Catalog**: Fuzzy and regex search over saved commands
//! - **Error Handling**: One error type for every failure mode
//!
//! # Examples
//!
//! Searching a catalog of commands:
//!
//! ```
//! use fuzzdial_core::command_definitions::CommandDefinition;
//! use fuzzdial_core::corpus::Corpus;
//! use fuzzdial_core::query::Query;
//! use fuzzdial_core::search::{CommandCatalog, SearchMode};
//!
//! let catalog = CommandCatalog::new(
//!     vec![
//!         CommandDefinition::new("go build ./...", Some("Build everything")),
//!         CommandDefinition::new("kubectl get pods", None),
//!     ],
//!     SearchMode::Fuzzy,
//! );
//!
//! let items = catalog.search(&Query::parse("kgp"))?;
//! assert_eq!(items[0].payload.invocation, "kubectl get pods");
//! # Ok::<(), fuzzdial_core::error::Error>(())
//! ```

pub mod command_definitions;
pub mod config;
pub mod corpus;
pub mod error;
pub mod file_handling;
pub mod matcher;
pub mod query;
pub mod search;
