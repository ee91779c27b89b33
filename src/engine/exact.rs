use regex::{Regex, escape};
use std::fmt::{Display, Error, Formatter};

use crate::engine::MatchOutcome;
use crate::item::MatchSpan;

/// Score of a literal fallback hit, regardless of how much matched
const LITERAL_MATCH_SCORE: f64 = 0.5;

//------------------------------------------------------------------------------
// Literal alternation, used for patterns too long for the bit-parallel matcher
#[derive(Debug)]
pub struct LiteralAlternation {
    regex: Option<Regex>,
}

impl LiteralAlternation {
    /// Splits `pattern` on `separator` and matches any of the fragments literally.
    ///
    /// `pattern` is expected to be case-folded already when the search ignores case.
    pub fn new(pattern: &str, separator: &Regex) -> crate::Result<Self> {
        let alternation = separator
            .split(pattern)
            .filter(|fragment| !fragment.is_empty())
            .map(escape)
            .collect::<Vec<_>>()
            .join("|");

        let regex = if alternation.is_empty() {
            None
        } else {
            Some(Regex::new(&alternation)?)
        };
        Ok(Self { regex })
    }

    /// Every occurrence of any fragment in `text`, as character ranges
    pub fn search(&self, text: &str) -> MatchOutcome {
        let Some(regex) = &self.regex else {
            return MatchOutcome::no_match(vec![]);
        };

        let mut indices: Vec<MatchSpan> = Vec::new();
        let mut chars_before = 0;
        let mut byte_cursor = 0;
        for found in regex.find_iter(text) {
            if found.is_empty() {
                continue;
            }
            chars_before += text[byte_cursor..found.start()].chars().count();
            let len = found.as_str().chars().count();
            indices.push((chars_before, chars_before + len - 1));
            chars_before += len;
            byte_cursor = found.end();
        }

        if indices.is_empty() {
            MatchOutcome::no_match(indices)
        } else {
            MatchOutcome {
                is_match: true,
                score: LITERAL_MATCH_SCORE,
                indices,
            }
        }
    }
}

impl Display for LiteralAlternation {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(Literal|{})", self.regex.as_ref().map(|x| x.as_str()).unwrap_or(""))
    }
}
