//! Morse pattern tables: byte -> dit/dah sequence for encoding, and the
//! reverse exact-match map the decoder resolves symbol buffers against.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::Symbol;

pub type MorsePattern = &'static [Symbol];

const DIT: Symbol = Symbol::Dit;
const DAH: Symbol = Symbol::Dah;

/// Canonical character set: ITU letters and digits plus the common
/// punctuation. Lookup is case-insensitive; decoded text is uppercase.
const PATTERNS: &[(u8, MorsePattern)] = &[
    (b'A', &[DIT, DAH]),
    (b'B', &[DAH, DIT, DIT, DIT]),
    (b'C', &[DAH, DIT, DAH, DIT]),
    (b'D', &[DAH, DIT, DIT]),
    (b'E', &[DIT]),
    (b'F', &[DIT, DIT, DAH, DIT]),
    (b'G', &[DAH, DAH, DIT]),
    (b'H', &[DIT, DIT, DIT, DIT]),
    (b'I', &[DIT, DIT]),
    (b'J', &[DIT, DAH, DAH, DAH]),
    (b'K', &[DAH, DIT, DAH]),
    (b'L', &[DIT, DAH, DIT, DIT]),
    (b'M', &[DAH, DAH]),
    (b'N', &[DAH, DIT]),
    (b'O', &[DAH, DAH, DAH]),
    (b'P', &[DIT, DAH, DAH, DIT]),
    (b'Q', &[DAH, DAH, DIT, DAH]),
    (b'R', &[DIT, DAH, DIT]),
    (b'S', &[DIT, DIT, DIT]),
    (b'T', &[DAH]),
    (b'U', &[DIT, DIT, DAH]),
    (b'V', &[DIT, DIT, DIT, DAH]),
    (b'W', &[DIT, DAH, DAH]),
    (b'X', &[DAH, DIT, DIT, DAH]),
    (b'Y', &[DAH, DIT, DAH, DAH]),
    (b'Z', &[DAH, DAH, DIT, DIT]),
    (b'0', &[DAH, DAH, DAH, DAH, DAH]),
    (b'1', &[DIT, DAH, DAH, DAH, DAH]),
    (b'2', &[DIT, DIT, DAH, DAH, DAH]),
    (b'3', &[DIT, DIT, DIT, DAH, DAH]),
    (b'4', &[DIT, DIT, DIT, DIT, DAH]),
    (b'5', &[DIT, DIT, DIT, DIT, DIT]),
    (b'6', &[DAH, DIT, DIT, DIT, DIT]),
    (b'7', &[DAH, DAH, DIT, DIT, DIT]),
    (b'8', &[DAH, DAH, DAH, DIT, DIT]),
    (b'9', &[DAH, DAH, DAH, DAH, DIT]),
    (b'.', &[DIT, DAH, DIT, DAH, DIT, DAH]),
    (b',', &[DAH, DAH, DIT, DIT, DAH, DAH]),
    (b'?', &[DIT, DIT, DAH, DAH, DIT, DIT]),
    (b'\'', &[DIT, DAH, DAH, DAH, DAH, DIT]),
    (b'!', &[DAH, DIT, DAH, DIT, DAH, DAH]),
    (b'/', &[DAH, DIT, DIT, DAH, DIT]),
    (b'(', &[DAH, DIT, DAH, DAH, DIT]),
    (b')', &[DAH, DIT, DAH, DAH, DIT, DAH]),
    (b'&', &[DIT, DAH, DIT, DIT, DIT]),
    (b':', &[DAH, DAH, DAH, DIT, DIT, DIT]),
    (b';', &[DAH, DIT, DAH, DIT, DAH, DIT]),
    (b'=', &[DAH, DIT, DIT, DIT, DAH]),
    (b'+', &[DIT, DAH, DIT, DAH, DIT]),
    (b'-', &[DAH, DIT, DIT, DIT, DIT, DAH]),
    (b'_', &[DIT, DIT, DAH, DAH, DIT, DAH]),
    (b'"', &[DIT, DAH, DIT, DIT, DAH, DIT]),
    (b'$', &[DIT, DIT, DIT, DAH, DIT, DIT, DAH]),
    (b'@', &[DIT, DAH, DAH, DIT, DAH, DIT]),
];

// Direct 256-entry table for O(1) lookup.
static PATTERN_TABLE: [Option<MorsePattern>; 256] = {
    let mut table = [None; 256];
    let mut i = 0;
    while i < PATTERNS.len() {
        let (ch, pattern) = PATTERNS[i];
        table[ch as usize] = Some(pattern);
        i += 1;
    }
    table
};

static REVERSE_TABLE: LazyLock<HashMap<MorsePattern, char>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .map(|&(ch, pattern)| (pattern, ch as char))
        .collect()
});

/// Pattern for a character, case-insensitive. `None` for characters with no
/// Morse encoding.
pub fn pattern_for(ch: u8) -> Option<MorsePattern> {
    PATTERN_TABLE[ch.to_ascii_uppercase() as usize]
}

/// Exact-match reverse lookup for a completed symbol sequence.
pub fn character_for(pattern: &[Symbol]) -> Option<char> {
    REVERSE_TABLE.get(pattern).copied()
}
