//! This module contains the collection scanner and the search entry points
use crate::engine::tokenized::TokenizedQuery;
use crate::error::Result;
use crate::item::{FieldMatch, MatchedRecord, RankBuilder, aggregate_score};
use crate::options::SearchOptions;
use crate::output::{SearchHit, format_results};
use crate::record::Record;

/// Scans `records` and returns every matching record with its aggregated score, ranked
/// when `should_sort` is set.
///
/// An empty or whitespace-only pattern yields no result.
pub fn scan<'a, R: Record>(
    records: &'a [R],
    pattern: &str,
    options: &SearchOptions,
    rank_builder: &RankBuilder,
) -> Result<Vec<MatchedRecord<'a, R>>> {
    options.validate()?;
    if pattern.trim().is_empty() {
        debug!("empty pattern, nothing to search");
        return Ok(Vec::new());
    }

    let query = TokenizedQuery::new(pattern, options)?;
    debug!(
        "searching {} records for {:?} with {} token searchers: {}",
        records.len(),
        pattern,
        query.token_count(),
        query
    );

    let mut matched = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let matches = match record.text() {
            Some(text) => match_value(&query, "", None, text)?.into_iter().collect(),
            None => {
                let mut matches = Vec::new();
                for key in &options.keys {
                    for value in record.field_values(&key.name) {
                        if let Some(field) = match_value(&query, &key.name, value.array_index, &value.text)? {
                            matches.push(field);
                        }
                    }
                }
                matches
            }
        };

        if matches.is_empty() {
            continue;
        }
        let mut record = MatchedRecord::new(record, index, matches);
        record.score = aggregate_score(&record.matches, options);
        trace!("record {} scored {}", index, record.score);
        matched.push(record);
    }

    if options.should_sort {
        rank_builder.sort(&mut matched);
    }
    debug!("{} of {} records matched {:?}", matched.len(), records.len(), pattern);
    Ok(matched)
}

fn match_value(query: &TokenizedQuery, key: &str, array_index: Option<usize>, value: &str) -> Result<Option<FieldMatch>> {
    let Some(outcome) = query.search_value(value)? else {
        return Ok(None);
    };
    trace!("key {:?} value {:?} scored {}", key, value, outcome.score);
    Ok(Some(FieldMatch {
        key: key.to_string(),
        array_index,
        value: value.to_string(),
        score: outcome.score,
        indices: outcome.indices,
    }))
}

/// One-shot search of `records` for `pattern`.
///
/// Validates `options` before anything is scanned.
pub fn search<'a, R: Record>(records: &'a [R], pattern: &str, options: &SearchOptions) -> Result<Vec<SearchHit<'a, R>>> {
    let rank_builder = RankBuilder::new(&options.tiebreak);
    let matched = scan(records, pattern, options, &rank_builder)?;
    Ok(format_results(matched, options))
}

//==============================================================================
/// A search engine bound to a borrowed record collection and options.
///
/// Holds no state between searches besides the references, so a collection can be
/// searched repeatedly, or swapped with [`Searcher::set_collection`], without any
/// indexing step.
pub struct Searcher<'a, R> {
    records: &'a [R],
    options: &'a SearchOptions,
    rank_builder: RankBuilder,
}

impl<'a, R: Record> Searcher<'a, R> {
    /// Creates a searcher, rejecting invalid options right away
    pub fn new(records: &'a [R], options: &'a SearchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            records,
            options,
            rank_builder: RankBuilder::new(&options.tiebreak),
        })
    }

    /// Replaces the searched collection
    pub fn set_collection(&mut self, records: &'a [R]) {
        self.records = records;
    }

    /// The searched collection
    pub fn records(&self) -> &'a [R] {
        self.records
    }

    /// Matching records with their scores and field matches, before formatting
    pub fn matched_records(&self, pattern: &str) -> Result<Vec<MatchedRecord<'a, R>>> {
        scan(self.records, pattern, self.options, &self.rank_builder)
    }

    /// Searches the collection and formats the results as configured
    pub fn search(&self, pattern: &str) -> Result<Vec<SearchHit<'a, R>>> {
        let matched = self.matched_records(pattern)?;
        Ok(format_results(matched, self.options))
    }
}
