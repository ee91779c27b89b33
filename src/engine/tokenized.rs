//! Token mode: the pattern is matched as a whole and also word by word.
use std::fmt::{Display, Error, Formatter};

use regex::Regex;

use crate::engine::{MatchOutcome, PatternSearcher};
use crate::error::Result;
use crate::options::SearchOptions;

//------------------------------------------------------------------------------
/// The searchers compiled from one pattern.
///
/// The full searcher always runs and provides the matched ranges. With `tokenize` set,
/// every non-empty token of the pattern also gets its own searcher, matched against the
/// individual words of each value.
#[derive(Debug)]
pub struct TokenizedQuery {
    full: PatternSearcher,
    tokens: Vec<PatternSearcher>,
    separator: Regex,
    match_all_tokens: bool,
}

impl TokenizedQuery {
    pub fn new(pattern: &str, options: &SearchOptions) -> Result<Self> {
        let full = PatternSearcher::new(pattern, options)?;
        let tokens = if options.tokenize {
            options
                .token_separator
                .split(pattern)
                .filter(|token| !token.is_empty())
                .map(|token| PatternSearcher::new(token, options))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        Ok(Self {
            full,
            tokens,
            separator: options.token_separator.clone(),
            match_all_tokens: options.tokenize && options.match_all_tokens,
        })
    }

    /// Number of per-token searchers, zero outside of token mode
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Matches one field value, `None` when the value is rejected
    pub fn search_value(&self, value: &str) -> Result<Option<MatchOutcome>> {
        let full = self.full.search(value)?;
        if self.tokens.is_empty() {
            return Ok(full.is_match.then_some(full));
        }

        let words: Vec<&str> = self.separator.split(value).filter(|word| !word.is_empty()).collect();
        let mut token_scores = Vec::with_capacity(self.tokens.len());
        let mut matched_tokens = 0;

        for token in &self.tokens {
            let mut best: Option<f64> = None;
            for word in &words {
                let outcome = token.search(word)?;
                if outcome.is_match {
                    best = Some(best.map_or(outcome.score, |b: f64| b.min(outcome.score)));
                }
            }

            match best {
                Some(score) => {
                    matched_tokens += 1;
                    token_scores.push(score);
                }
                None if !self.match_all_tokens => token_scores.push(1.0),
                None => {}
            }
            trace!("token {:?} in {:?}: {:?}", token.pattern(), value, best);
        }

        let mut score = full.score;
        if !token_scores.is_empty() {
            let average = token_scores.iter().sum::<f64>() / token_scores.len() as f64;
            score = (score + average) / 2.0;
            trace!("full score {}, token average {}, combined {}", full.score, average, score);
        }

        let all_tokens_matched = !self.match_all_tokens || matched_tokens == self.tokens.len();
        trace!("all tokens matched: {all_tokens_matched}");
        if (matched_tokens > 0 || full.is_match) && all_tokens_matched {
            Ok(Some(MatchOutcome {
                is_match: true,
                score,
                indices: full.indices,
            }))
        } else {
            Ok(None)
        }
    }
}

impl Display for TokenizedQuery {
    fn fmt(&self, f: &mut Formatter) -> std::result::Result<(), Error> {
        if self.tokens.is_empty() {
            return write!(f, "{}", self.full);
        }
        write!(f, "(Tokens: {}", self.full)?;
        for token in &self.tokens {
            write!(f, " {token}")?;
        }
        write!(f, ")")
    }
}
