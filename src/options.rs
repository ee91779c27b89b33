//! Configuration options for a search.
//!
//! This module provides the `SearchOptions` struct and its builder. The options are an
//! immutable value: a search borrows them and never mutates them.

use derive_builder::Builder;
use regex::Regex;

use crate::error::{Result, SearchError};
use crate::item::RankCriteria;

/// Width of the bit vectors used by the approximate matcher
pub const MAX_BITAP_WIDTH: usize = u64::BITS as usize;

const DEFAULT_TOKEN_SEPARATOR: &str = r"\s+";

#[cfg(feature = "cli")]
/// Custom value parser for the token separator
fn parse_separator_value(s: &str) -> std::result::Result<Regex, String> {
    Regex::new(s).map_err(|e| format!("Invalid regex separator: {}", e))
}

#[cfg(feature = "cli")]
/// Custom value parser for `name` / `name:weight` key specs
fn parse_key_value(s: &str) -> std::result::Result<KeySpec, String> {
    match s.rsplit_once(':') {
        Some((name, weight)) => {
            let weight: f64 = weight
                .parse()
                .map_err(|e| format!("Invalid weight {weight:?} for key {name:?}: {e}"))?;
            Ok(KeySpec::weighted(name, weight))
        }
        None => Ok(KeySpec::new(s)),
    }
}

//------------------------------------------------------------------------------
/// A key path to search, with its weight
///
/// The name is a dotted path (`author.name`) resolved against each record.
/// The weight must lie in `(0, 1]`; a weight of 1 is a "full" key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySpec {
    /// Dotted key path
    pub name: String,
    /// Weight in `(0, 1]`
    pub weight: f64,
}

impl KeySpec {
    /// A full-weight key
    pub fn new(name: impl Into<String>) -> Self {
        Self::weighted(name, 1.0)
    }

    /// A key with an explicit weight, validated when the search is set up
    pub fn weighted(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Checks the weight invariant
    pub fn validate(&self) -> Result<()> {
        if self.weight > 0.0 && self.weight <= 1.0 {
            Ok(())
        } else {
            Err(SearchError::InvalidKeyWeight {
                key: self.name.clone(),
                weight: self.weight,
            })
        }
    }
}

impl From<&str> for KeySpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for KeySpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, f64)> for KeySpec {
    fn from((name, weight): (&str, f64)) -> Self {
        Self::weighted(name, weight)
    }
}

//------------------------------------------------------------------------------
/// Options controlling how a pattern is matched, scored, ranked and reported
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(name = "final_build"))]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct SearchOptions {
    //  --- Matching ---
    /// Expected position of the match in the searched text
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 0, help_heading = "Matching"))]
    pub location: usize,

    /// How far from `location` a match may be before it is rejected
    ///
    /// A match `distance` characters away from `location` scores a full 1.0 penalty.
    /// Use `inf` to ignore the position entirely.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 100.0, help_heading = "Matching"))]
    pub distance: f64,

    /// Maximum accepted score, 0.0 requires a perfect match and 1.0 matches anything
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 0.6, help_heading = "Matching"))]
    pub threshold: f64,

    /// Patterns longer than this use the literal fallback instead of the approximate matcher
    ///
    /// Must be between 1 and 64
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 32, help_heading = "Matching"))]
    pub max_pattern_length: usize,

    /// Shortest run of matched characters reported as a matched range
    #[cfg_attr(feature = "cli", arg(long, default_value_t = 1, help_heading = "Matching"))]
    pub min_match_char_length: usize,

    /// Compare characters exactly instead of folding case
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Matching"))]
    pub case_sensitive: bool,

    /// Keep scanning the whole text instead of stopping around the best match
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Matching"))]
    pub find_all_matches: bool,

    /// Separator used to split tokens and long patterns, in regex format
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = DEFAULT_TOKEN_SEPARATOR, value_parser = parse_separator_value, help_heading = "Matching")
    )]
    pub token_separator: Regex,

    /// Split the pattern into tokens and match each one separately
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Matching"))]
    pub tokenize: bool,

    /// With `tokenize`, only accept values in which every token matched
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Matching"))]
    pub match_all_tokens: bool,

    //  --- Records ---
    /// Key paths to search in structured records, as `name` or `name:weight`
    ///
    /// Plain string records ignore keys.
    #[cfg_attr(
        feature = "cli",
        arg(short, long = "key", value_parser = parse_key_value, help_heading = "Records")
    )]
    pub keys: Vec<KeySpec>,

    /// Report the value at this key path instead of the whole record
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Records"))]
    #[builder(setter(into, strip_option))]
    pub id: Option<String>,

    //  --- Output ---
    /// Attach the matched ranges of every field to each result
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Output"))]
    pub include_matches: bool,

    /// Attach the final score to each result
    #[cfg_attr(feature = "cli", arg(long, help_heading = "Output"))]
    pub include_score: bool,

    /// Sort the results by score
    #[cfg_attr(
        feature = "cli",
        arg(long = "no-sort", action = clap::ArgAction::SetFalse, help_heading = "Output")
    )]
    pub should_sort: bool,

    /// Comma-separated list of sort criteria, compared in order
    ///
    /// Each criterion could be negated, e.g. (-index)
    #[cfg_attr(
        feature = "cli",
        arg(
            long,
            default_value = "score",
            value_enum,
            value_delimiter = ',',
            allow_hyphen_values = true,
            help_heading = "Output"
        )
    )]
    pub tiebreak: Vec<RankCriteria>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            location: 0,
            distance: 100.0,
            threshold: 0.6,
            max_pattern_length: 32,
            min_match_char_length: 1,
            case_sensitive: false,
            find_all_matches: false,
            token_separator: Regex::new(DEFAULT_TOKEN_SEPARATOR).unwrap(),
            tokenize: false,
            match_all_tokens: false,
            keys: Vec::new(),
            id: None,
            include_matches: false,
            include_score: false,
            should_sort: true,
            tiebreak: vec![RankCriteria::Score],
        }
    }
}

impl SearchOptionsBuilder {
    /// Builds and validates the options
    pub fn build(&mut self) -> Result<SearchOptions> {
        let options = self.final_build().map_err(|e| SearchError::Builder(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

impl SearchOptions {
    /// Checks every invariant a search relies on.
    ///
    /// Called by the builder and again before any scanning starts.
    pub fn validate(&self) -> Result<()> {
        for key in &self.keys {
            key.validate()?;
        }

        if self.max_pattern_length == 0 || self.max_pattern_length > MAX_BITAP_WIDTH {
            return Err(SearchError::InvalidOptions(format!(
                "max_pattern_length must be between 1 and {MAX_BITAP_WIDTH}, got {}",
                self.max_pattern_length
            )));
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SearchError::InvalidOptions(format!(
                "threshold must be a finite number >= 0, got {}",
                self.threshold
            )));
        }

        if self.distance.is_nan() || self.distance < 0.0 {
            return Err(SearchError::InvalidOptions(format!(
                "distance must be >= 0, got {}",
                self.distance
            )));
        }

        Ok(())
    }

    /// Weight of the key at `name`, 1 for the identity key and unknown keys
    pub fn key_weight(&self, name: &str) -> f64 {
        self.keys
            .iter()
            .find(|key| key.name == name)
            .map_or(1.0, |key| key.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.location, 0);
        assert_eq!(options.distance, 100.0);
        assert_eq!(options.threshold, 0.6);
        assert_eq!(options.max_pattern_length, 32);
        assert_eq!(options.min_match_char_length, 1);
        assert!(options.should_sort);
        assert!(!options.tokenize);
        assert_eq!(options.tiebreak, vec![RankCriteria::Score]);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_keeps_defaults() {
        let options = SearchOptionsBuilder::default()
            .threshold(0.2)
            .keys(vec!["title".into(), ("content", 0.5).into()])
            .id("link")
            .build()
            .unwrap();
        assert_eq!(options.threshold, 0.2);
        assert_eq!(options.distance, 100.0);
        assert_eq!(options.id.as_deref(), Some("link"));
        assert_eq!(options.key_weight("content"), 0.5);
        assert_eq!(options.key_weight("title"), 1.0);
        assert_eq!(options.key_weight(""), 1.0);
    }

    #[test]
    fn test_invalid_weights() {
        for weight in [0.0, -0.5, 1.5] {
            let err = SearchOptionsBuilder::default()
                .keys(vec![KeySpec::weighted("title", weight)])
                .build()
                .unwrap_err();
            assert!(matches!(err, SearchError::InvalidKeyWeight { .. }), "{err}");
        }
    }

    #[test]
    fn test_invalid_pattern_width() {
        let err = SearchOptionsBuilder::default().max_pattern_length(65).build().unwrap_err();
        assert!(matches!(err, SearchError::InvalidOptions(_)));
        let err = SearchOptionsBuilder::default().max_pattern_length(0).build().unwrap_err();
        assert!(matches!(err, SearchError::InvalidOptions(_)));
    }

    #[test]
    fn test_unbounded_distance_is_valid() {
        let options = SearchOptionsBuilder::default().distance(f64::INFINITY).build().unwrap();
        assert!(options.distance.is_infinite());
        let err = SearchOptionsBuilder::default().distance(f64::NAN).build().unwrap_err();
        assert!(matches!(err, SearchError::InvalidOptions(_)));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("title").unwrap(), KeySpec::new("title"));
        assert_eq!(parse_key_value("author.name:0.3").unwrap(), KeySpec::weighted("author.name", 0.3));
        assert!(parse_key_value("title:heavy").is_err());
    }
}
