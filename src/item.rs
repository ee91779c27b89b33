//! Matched items, score aggregation and ranking.
//!
//! A search produces one [`FieldMatch`] per matching field value, groups them per
//! record into a [`MatchedRecord`], combines their scores into a single record score and
//! finally ranks the records.
use std::cmp::Ordering;

#[cfg(feature = "cli")]
use clap::ValueEnum;
#[cfg(feature = "cli")]
use clap::builder::PossibleValue;

use crate::options::SearchOptions;

/// Inclusive `(start, end)` character range of a match
pub type MatchSpan = (usize, usize);

/// Score assigned to a zero-score match on a dampened key, so it still ranks by weight
const DAMPENED_ZERO_SCORE: f64 = 0.001;

//------------------------------------------------------------------------------
/// A single field value of a record that matched the pattern
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Key path of the field, empty for plain string records
    pub key: String,
    /// Position of the value when the key path went through an array
    pub array_index: Option<usize>,
    /// The searched value
    pub value: String,
    /// Score in `[0, 1]`, lower is better
    pub score: f64,
    /// Sorted, non-overlapping matched ranges in `value`
    pub indices: Vec<MatchSpan>,
}

//------------------------------------------------------------------------------
/// A record with at least one matching field
#[derive(Debug)]
pub struct MatchedRecord<'a, R> {
    /// The record, borrowed from the searched collection
    pub record: &'a R,
    /// Position of the record in the collection
    pub index: usize,
    /// Aggregated score, lower is better
    pub score: f64,
    /// Every field value that matched, in key order
    pub matches: Vec<FieldMatch>,
}

impl<R> Clone for MatchedRecord<'_, R> {
    fn clone(&self) -> Self {
        Self {
            record: self.record,
            index: self.index,
            score: self.score,
            matches: self.matches.clone(),
        }
    }
}

impl<'a, R> MatchedRecord<'a, R> {
    /// Groups the field matches of one record, the score is computed by [`aggregate_score`]
    pub fn new(record: &'a R, index: usize, matches: Vec<FieldMatch>) -> Self {
        Self {
            record,
            index,
            score: 1.0,
            matches,
        }
    }
}

/// Combines the field scores of a record into one score.
///
/// A full-weight key (weight 1) keeps its raw score, a key with weight `w < 1` contributes
/// `score * (1 - w)`. When every key in play has full weight the scores are multiplied, so
/// every field has to match well. As soon as one key is dampened, the best (lowest)
/// weighted score wins on its own.
pub fn aggregate_score(matches: &[FieldMatch], options: &SearchOptions) -> f64 {
    let mut product = 1.0;
    let mut best = f64::INFINITY;
    let mut dampened = false;

    for field in matches {
        let weight = options.key_weight(&field.key);
        let weighted = if weight == 1.0 {
            field.score
        } else {
            dampened = true;
            let score = if field.score == 0.0 {
                DAMPENED_ZERO_SCORE
            } else {
                field.score
            };
            score * (1.0 - weight)
        };
        product *= weighted;
        best = best.min(weighted);
    }

    if dampened { best } else { product }
}

//------------------------------------------------------------------------------
/// Criteria for ranking and sorting matched records
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RankCriteria {
    /// Sort by score (lower is better)
    Score,
    /// Sort by score (higher is better)
    NegScore,
    /// Sort by record index
    Index,
    /// Sort by record index (reversed)
    NegIndex,
}

#[cfg(feature = "cli")]
impl ValueEnum for RankCriteria {
    fn value_variants<'a>() -> &'a [Self] {
        use RankCriteria::*;
        &[Score, NegScore, Index, NegIndex]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        use RankCriteria::*;
        Some(match self {
            Score => PossibleValue::new("score"),
            NegScore => PossibleValue::new("-score"),
            Index => PossibleValue::new("index"),
            NegIndex => PossibleValue::new("-index"),
        })
    }
}

/// Rank tuple compared lexicographically, smaller ranks first
pub type Rank = [f64; 4];

/// Builder for creating rank values based on configurable criteria
#[derive(Debug)]
pub struct RankBuilder {
    criterion: Vec<RankCriteria>,
}

impl Default for RankBuilder {
    fn default() -> Self {
        Self {
            criterion: vec![RankCriteria::Score],
        }
    }
}

impl RankBuilder {
    /// Creates a new rank builder with the given criteria
    pub fn new(criterion: &[RankCriteria]) -> Self {
        let mut criterion = criterion.to_vec();
        if !criterion.contains(&RankCriteria::Score) && !criterion.contains(&RankCriteria::NegScore) {
            criterion.insert(0, RankCriteria::Score);
        }

        criterion.dedup();
        Self { criterion }
    }

    /// score: the lower the better
    pub fn build_rank(&self, score: f64, index: usize) -> Rank {
        let mut rank = [0.0; 4];
        let index = index as f64;

        for (priority, criteria) in self.criterion.iter().take(4).enumerate() {
            rank[priority] = match criteria {
                RankCriteria::Score => score,
                RankCriteria::NegScore => -score,
                RankCriteria::Index => index,
                RankCriteria::NegIndex => -index,
            };
        }

        rank
    }

    /// Compares two matched records
    pub fn compare<R>(&self, a: &MatchedRecord<'_, R>, b: &MatchedRecord<'_, R>) -> Ordering {
        let a = self.build_rank(a.score, a.index);
        let b = self.build_rank(b.score, b.index);
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Sorts the records in place.
    ///
    /// The sort is stable: records that compare equal keep their scan order.
    pub fn sort<R>(&self, records: &mut [MatchedRecord<'_, R>]) {
        records.sort_by(|a, b| self.compare(a, b));
        trace!("ranked {} records", records.len());
    }
}
