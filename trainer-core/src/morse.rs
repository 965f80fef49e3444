//! Static Morse lookup table
//!
//! Sequences are indexed as a binary tree: a leading 1 bit followed by one
//! bit per symbol (0 = dot, 1 = dash). Six symbols fit in 7 bits.

use crate::types::Symbol;

/// Longest sequence accepted in one character
pub const MAX_SYMBOLS: usize = 6;

const TABLE_SIZE: usize = 1 << (MAX_SYMBOLS + 1);

pub type MorsePattern = &'static [Symbol];

const DOT: Symbol = Symbol::Dot;
const DASH: Symbol = Symbol::Dash;

const CODES: &[(u8, MorsePattern)] = &[
    // Letters
    (b'A', &[DOT, DASH]),
    (b'B', &[DASH, DOT, DOT, DOT]),
    (b'C', &[DASH, DOT, DASH, DOT]),
    (b'D', &[DASH, DOT, DOT]),
    (b'E', &[DOT]),
    (b'F', &[DOT, DOT, DASH, DOT]),
    (b'G', &[DASH, DASH, DOT]),
    (b'H', &[DOT, DOT, DOT, DOT]),
    (b'I', &[DOT, DOT]),
    (b'J', &[DOT, DASH, DASH, DASH]),
    (b'K', &[DASH, DOT, DASH]),
    (b'L', &[DOT, DASH, DOT, DOT]),
    (b'M', &[DASH, DASH]),
    (b'N', &[DASH, DOT]),
    (b'O', &[DASH, DASH, DASH]),
    (b'P', &[DOT, DASH, DASH, DOT]),
    (b'Q', &[DASH, DASH, DOT, DASH]),
    (b'R', &[DOT, DASH, DOT]),
    (b'S', &[DOT, DOT, DOT]),
    (b'T', &[DASH]),
    (b'U', &[DOT, DOT, DASH]),
    (b'V', &[DOT, DOT, DOT, DASH]),
    (b'W', &[DOT, DASH, DASH]),
    (b'X', &[DASH, DOT, DOT, DASH]),
    (b'Y', &[DASH, DOT, DASH, DASH]),
    (b'Z', &[DASH, DASH, DOT, DOT]),
    // Digits
    (b'0', &[DASH, DASH, DASH, DASH, DASH]),
    (b'1', &[DOT, DASH, DASH, DASH, DASH]),
    (b'2', &[DOT, DOT, DASH, DASH, DASH]),
    (b'3', &[DOT, DOT, DOT, DASH, DASH]),
    (b'4', &[DOT, DOT, DOT, DOT, DASH]),
    (b'5', &[DOT, DOT, DOT, DOT, DOT]),
    (b'6', &[DASH, DOT, DOT, DOT, DOT]),
    (b'7', &[DASH, DASH, DOT, DOT, DOT]),
    (b'8', &[DASH, DASH, DASH, DOT, DOT]),
    (b'9', &[DASH, DASH, DASH, DASH, DOT]),
    // Punctuation
    (b'.', &[DOT, DASH, DOT, DASH, DOT, DASH]),
    (b',', &[DASH, DASH, DOT, DOT, DASH, DASH]),
    (b'?', &[DOT, DOT, DASH, DASH, DOT, DOT]),
    (b'\'', &[DOT, DASH, DASH, DASH, DASH, DOT]),
    (b'!', &[DASH, DOT, DASH, DOT, DASH, DASH]),
    (b'/', &[DASH, DOT, DOT, DASH, DOT]),
    (b'(', &[DASH, DOT, DASH, DASH, DOT]),
    (b')', &[DASH, DOT, DASH, DASH, DOT, DASH]),
    (b'&', &[DOT, DASH, DOT, DOT, DOT]),
    (b':', &[DASH, DASH, DASH, DOT, DOT, DOT]),
    (b';', &[DASH, DOT, DASH, DOT, DASH, DOT]),
    (b'=', &[DASH, DOT, DOT, DOT, DASH]),
    (b'+', &[DOT, DASH, DOT, DASH, DOT]),
    (b'-', &[DASH, DOT, DOT, DOT, DOT, DASH]),
    (b'_', &[DOT, DOT, DASH, DASH, DOT, DASH]),
    (b'"', &[DOT, DASH, DOT, DOT, DASH, DOT]),
    (b'@', &[DOT, DASH, DASH, DOT, DASH, DOT]),
];

const fn pattern_index(pattern: &[Symbol]) -> usize {
    let mut index = 1usize;
    let mut i = 0;
    while i < pattern.len() {
        index = (index << 1)
            | match pattern[i] {
                Symbol::Dot => 0,
                Symbol::Dash => 1,
            };
        i += 1;
    }
    index
}

// 0 marks an empty slot
static DECODE_TABLE: [u8; TABLE_SIZE] = {
    let mut table = [0u8; TABLE_SIZE];
    let mut i = 0;
    while i < CODES.len() {
        let (ch, pattern) = CODES[i];
        table[pattern_index(pattern)] = ch;
        i += 1;
    }
    table
};

/// Look up a complete symbol sequence
pub fn decode(symbols: &[Symbol]) -> Option<char> {
    if symbols.is_empty() || symbols.len() > MAX_SYMBOLS {
        return None;
    }
    match DECODE_TABLE[pattern_index(symbols)] {
        0 => None,
        ch => Some(ch as char),
    }
}

/// Canonical sequence for `c` (case-insensitive)
pub fn encode(c: char) -> Option<MorsePattern> {
    let upper = c.to_ascii_uppercase();
    CODES
        .iter()
        .find(|(ch, _)| *ch as char == upper)
        .map(|(_, pattern)| *pattern)
}

/// Every character in the table, in table order
pub fn characters() -> impl Iterator<Item = char> {
    CODES.iter().map(|(ch, _)| *ch as char)
}
