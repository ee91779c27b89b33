//! fzsearch is an approximate (fuzzy) text search library.
//!
//! It searches a collection of plain strings or structured records for a pattern,
//! tolerating typos and partial words, and returns the matching records ranked by
//! similarity together with the character ranges that matched. Each search is a fresh
//! linear scan: there is no index to build or keep up to date.
//!
//! # Examples
//!
//! ```rust
//! use fzsearch::prelude::*;
//! use serde_json::json;
//!
//! let books = vec![
//!     json!({"title": "Old Man's War", "author": {"name": "John Scalzi"}}),
//!     json!({"title": "The Lock Artist", "author": {"name": "Steve Hamilton"}}),
//! ];
//!
//! let options = SearchOptionsBuilder::default()
//!     .keys(vec!["title".into(), ("author.name", 0.3).into()])
//!     .include_score(true)
//!     .build()
//!     .unwrap();
//!
//! let hits = fzsearch::search(&books, "scalzi", &options).unwrap();
//! assert_eq!(hits[0].record(), Some(&books[0]));
//! assert!(hits[0].score.unwrap() < 0.1);
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod engine;
pub mod error;
pub mod field;
pub mod item;
mod matcher;
pub mod options;
pub mod output;
pub mod prelude;
pub mod reader;
pub mod record;

pub use crate::engine::{MatchOutcome, PatternSearcher};
pub use crate::error::{Result, SearchError};
pub use crate::item::RankCriteria;
pub use crate::matcher::{Searcher, scan, search};
pub use crate::options::{KeySpec, SearchOptions, SearchOptionsBuilder};
pub use crate::output::SearchHit;
pub use crate::record::Record;
