//! Single-pattern matching engines.
//!
//! [`PatternSearcher`] is what the rest of the crate talks to. It folds case, handles
//! whole-text equality and picks between the bit-parallel matcher and the literal
//! fallback for patterns too long to fit in a machine word.

use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

use thread_local::ThreadLocal;

use crate::engine::alphabet::Alphabet;
use crate::engine::bitap::{BitapBuffers, BitapParams};
use crate::engine::exact::LiteralAlternation;
use crate::engine::util::fill_chars;
use crate::error::Result;
use crate::item::MatchSpan;
use crate::options::SearchOptions;

pub mod alphabet;
pub mod bitap;
pub mod exact;
pub mod score;
pub mod tokenized;
pub mod util;

/// Result of matching one pattern against one text
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Whether the text matched under the configured threshold
    pub is_match: bool,
    /// Score in `[0, 1]`, lower is better, 1 when nothing matched
    pub score: f64,
    /// Matched character ranges, sorted and non-overlapping
    pub indices: Vec<MatchSpan>,
}

impl MatchOutcome {
    /// A failed match, keeping whatever ranges the scan flagged
    pub fn no_match(indices: Vec<MatchSpan>) -> Self {
        Self {
            is_match: false,
            score: 1.0,
            indices,
        }
    }

    fn exact(len: usize) -> Self {
        Self {
            is_match: true,
            score: 0.0,
            indices: if len == 0 { vec![] } else { vec![(0, len - 1)] },
        }
    }
}

#[derive(Debug)]
enum Strategy {
    Bitap(Alphabet),
    Literal(LiteralAlternation),
}

#[derive(Debug, Default)]
struct Scratch {
    text: Vec<char>,
    buffers: BitapBuffers,
}

//------------------------------------------------------------------------------
/// A pattern prepared for repeated matching against many texts.
///
/// Immutable once built; scratch buffers are kept per thread so one searcher can be
/// shared across threads.
#[derive(Debug)]
pub struct PatternSearcher {
    pattern: String,
    pattern_chars: Vec<char>,
    strategy: Strategy,
    params: BitapParams,
    case_sensitive: bool,
    scratch: ThreadLocal<RefCell<Scratch>>,
}

impl PatternSearcher {
    /// Prepares `pattern`, failing only when the literal fallback cannot be compiled
    pub fn new(pattern: &str, options: &SearchOptions) -> Result<Self> {
        let mut pattern_chars = Vec::new();
        fill_chars(&mut pattern_chars, pattern, options.case_sensitive);

        let strategy = if pattern_chars.len() > options.max_pattern_length {
            let folded: String = pattern_chars.iter().collect();
            Strategy::Literal(LiteralAlternation::new(&folded, &options.token_separator)?)
        } else {
            Strategy::Bitap(Alphabet::new(&pattern_chars))
        };

        Ok(Self {
            pattern: pattern.to_string(),
            pattern_chars,
            strategy,
            params: BitapParams {
                location: options.location,
                distance: options.distance,
                threshold: options.threshold,
                find_all_matches: options.find_all_matches,
                min_match_char_length: options.min_match_char_length,
            },
            case_sensitive: options.case_sensitive,
            scratch: ThreadLocal::new(),
        })
    }

    /// The pattern as given, before case folding
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches the pattern against `text`
    pub fn search(&self, text: &str) -> Result<MatchOutcome> {
        let mut scratch = self.scratch.get_or(|| RefCell::new(Scratch::default())).borrow_mut();
        let Scratch { text: chars, buffers } = &mut *scratch;
        fill_chars(chars, text, self.case_sensitive);

        if *chars == self.pattern_chars {
            return Ok(MatchOutcome::exact(chars.len()));
        }
        if self.pattern_chars.is_empty() {
            return Ok(MatchOutcome::no_match(vec![]));
        }

        match &self.strategy {
            Strategy::Bitap(alphabet) => bitap::search(chars, &self.pattern_chars, alphabet, &self.params, buffers),
            Strategy::Literal(literal) => {
                let folded: String = chars.iter().collect();
                Ok(literal.search(&folded))
            }
        }
    }
}

impl Display for PatternSearcher {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), Error> {
        match &self.strategy {
            Strategy::Bitap(_) => write!(f, "(Bitap: {})", self.pattern),
            Strategy::Literal(literal) => write!(f, "{literal}"),
        }
    }
}
