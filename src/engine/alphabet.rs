//! Per-pattern character masks for the bit-parallel matcher.

use std::collections::HashMap;

/// Maps every distinct pattern character to the positions it occupies.
///
/// For a pattern of length `m`, the mask of a character has bit `m - 1 - i` set when the
/// character occurs at pattern position `i`. Built once per pattern and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct Alphabet {
    masks: HashMap<char, u64>,
}

impl Alphabet {
    /// Builds the masks for `pattern`, which must fit in a `u64`
    pub fn new(pattern: &[char]) -> Self {
        debug_assert!(pattern.len() <= u64::BITS as usize);
        let len = pattern.len();
        let mut masks: HashMap<char, u64> = HashMap::with_capacity(len);
        for (i, &ch) in pattern.iter().enumerate() {
            *masks.entry(ch).or_default() |= 1u64 << (len - i - 1);
        }
        Self { masks }
    }

    /// Mask of `ch`, zero when the pattern does not contain it
    #[inline]
    pub fn mask(&self, ch: char) -> u64 {
        self.masks.get(&ch).copied().unwrap_or(0)
    }
}
