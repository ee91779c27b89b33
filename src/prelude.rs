//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! fzsearch types and traits with a single `use fzsearch::prelude::*;` statement.

pub use crate::error::{Result, SearchError};
pub use crate::field::FieldValue;
pub use crate::item::{FieldMatch, MatchSpan, MatchedRecord, RankBuilder, RankCriteria};
pub use crate::matcher::{Searcher, search};
pub use crate::options::{KeySpec, SearchOptions, SearchOptionsBuilder};
pub use crate::output::{HitItem, MatchInfo, SearchHit};
pub use crate::record::Record;
pub use std::borrow::Cow;
