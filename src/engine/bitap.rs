//! Bit-parallel approximate matching.
//!
//! This is the Bitap (Wu-Manber) algorithm extended to any number of errors. For every
//! error level `e` a bit vector `R` is carried across the text, scanning from right to
//! left. Bit `k` of `R` at text position `j` is set when the last `k + 1` pattern
//! characters can be aligned starting at `j` with at most `e` edits, so the highest bit
//! (`1 << (m - 1)`) flags a complete alignment.
//!
//! Before each error level, a bisection over the offset from the expected location finds
//! how far a match may lie and still score below the best score found so far. Only that
//! window is scanned, which keeps the cost bounded once a good match has been seen.
//! The search stops raising the error level when even a perfectly placed alignment with
//! one more error could not beat the current best score.

use std::cmp::{max, min};

use crate::engine::MatchOutcome;
use crate::engine::alphabet::Alphabet;
use crate::engine::score::LocationScore;
use crate::engine::util::{index_of, last_index_of};
use crate::error::{Result, SearchError};
use crate::item::MatchSpan;
use crate::options::MAX_BITAP_WIDTH;

/// Score reported for a perfect alignment that was not a whole-text match
const PERFECT_ALIGNMENT_SCORE: f64 = 0.001;

/// Parameters of one approximate search
#[derive(Debug, Clone, Copy)]
pub struct BitapParams {
    pub location: usize,
    pub distance: f64,
    pub threshold: f64,
    pub find_all_matches: bool,
    pub min_match_char_length: usize,
}

/// Buffers reused across the texts searched with one pattern
#[derive(Debug, Default)]
pub struct BitapBuffers {
    match_mask: Vec<bool>,
    bits: Vec<u64>,
    last_bits: Vec<u64>,
}

/// Searches `text` for `pattern`, both already case-folded as needed
pub fn search(
    text: &[char],
    pattern: &[char],
    alphabet: &Alphabet,
    params: &BitapParams,
    buffers: &mut BitapBuffers,
) -> Result<MatchOutcome> {
    let text_len = text.len();
    let pattern_len = pattern.len();
    if pattern_len == 0 || pattern_len > MAX_BITAP_WIDTH {
        return Err(SearchError::Internal(format!(
            "bitap search called with a pattern of {pattern_len} characters"
        )));
    }

    let expected = params.location;
    let model = LocationScore::new(pattern_len, expected, params.distance);
    let mut threshold = params.threshold;

    // An exact occurrence near the expected location bounds the score we need to beat
    if let Some(found) = index_of(text, pattern, expected) {
        threshold = threshold.min(model.score(0, found));
        if let Some(found) = last_index_of(text, pattern, expected.saturating_add(pattern_len)) {
            threshold = threshold.min(model.score(0, found));
        }
    }

    let BitapBuffers {
        match_mask,
        bits,
        last_bits,
    } = buffers;
    match_mask.clear();
    match_mask.resize(text_len, false);
    last_bits.clear();

    let full_match = 1u64 << (pattern_len - 1);
    let mut best_location: Option<usize> = None;
    let mut best_score = 1.0;
    let mut bin_max = pattern_len + text_len;

    for errors in 0..pattern_len {
        // Widest offset from the expected location that could still beat the threshold
        let mut bin_min = 0;
        let mut bin_mid = bin_max;
        while bin_min < bin_mid {
            if model.score(errors, expected.saturating_add(bin_mid)) <= threshold {
                bin_min = bin_mid;
            } else {
                bin_max = bin_mid;
            }
            bin_mid = (bin_max - bin_min) / 2 + bin_min;
        }
        bin_max = bin_mid;

        let (mut start, finish) = if params.find_all_matches {
            (1, text_len)
        } else {
            (
                max(1, expected.saturating_add(1).saturating_sub(bin_mid)),
                min(expected.saturating_add(bin_mid), text_len) + pattern_len,
            )
        };

        bits.clear();
        bits.resize(finish + 2, 0);
        bits[finish + 1] = (1u64 << errors) - 1;

        let mut j = finish;
        while j >= start {
            let current = j - 1;
            let char_match = text.get(current).map_or(0, |&ch| alphabet.mask(ch));
            if char_match != 0 {
                match_mask[current] = true;
            }

            let mut state = ((bits[j + 1] << 1) | 1) & char_match;
            if errors != 0 {
                let prev = last_bits.get(j).copied().unwrap_or(0);
                let prev_next = last_bits.get(j + 1).copied().unwrap_or(0);
                state |= (((prev_next | prev) << 1) | 1) | prev_next;
            }
            bits[j] = state;

            if state & full_match != 0 {
                let score = model.score(errors, current);
                if score <= threshold {
                    threshold = score;
                    best_score = score;
                    best_location = Some(current);

                    if !params.find_all_matches {
                        // Nothing left of the expected location can beat this one
                        if current <= expected {
                            break;
                        }
                        start = max(1, (2 * expected).saturating_sub(current));
                    }
                }
            }
            j -= 1;
        }

        if model.score(errors + 1, expected) > threshold {
            break;
        }
        std::mem::swap(bits, last_bits);
    }

    let Some(location) = best_location else {
        return Ok(MatchOutcome::no_match(collapse_ranges(match_mask, params.min_match_char_length)));
    };
    trace!("bitap best location {location}, score {best_score}");

    Ok(MatchOutcome {
        is_match: true,
        score: if best_score == 0.0 {
            PERFECT_ALIGNMENT_SCORE
        } else {
            best_score
        },
        indices: collapse_ranges(match_mask, params.min_match_char_length),
    })
}

/// Turns per-character match flags into inclusive ranges of at least `min_len` characters
pub fn collapse_ranges(mask: &[bool], min_len: usize) -> Vec<MatchSpan> {
    let mut ranges = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &matched) in mask.iter().enumerate() {
        match (matched, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                if i - start >= min_len {
                    ranges.push((start, i - 1));
                }
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start
        && mask.len() - start >= min_len
    {
        ranges.push((start, mask.len() - 1));
    }

    ranges
}
