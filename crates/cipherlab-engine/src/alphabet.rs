//! Mapping between text and the 26-letter ring
//!
//! Every classical cipher first runs its input through [`clean`], which
//! uppercases and drops anything outside `A..=Z`. Letters then map to ring
//! indices with the fixed bijection `A = 0 .. Z = 25`.

/// Letters of the ring in index order
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Size of the ring
pub const RING: u64 = 26;

/// Uppercase `text` and strip every character that is not `A..=Z`.
///
/// ```
/// use cipherlab_engine::alphabet::clean;
///
/// assert_eq!(clean("Hello, World!"), "HELLOWORLD");
/// ```
pub fn clean(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_uppercase)
        .collect()
}

/// Index of an uppercase letter, `None` outside `A..=Z`
pub fn index_of(letter: char) -> Option<u8> {
    letter
        .is_ascii_uppercase()
        .then(|| letter as u8 - b'A')
}

/// Letter for a ring index; indices wrap mod 26
pub fn letter_at(index: u64) -> char {
    char::from(ALPHABET[(index % RING) as usize])
}

/// Indices of an already cleaned string
pub fn indices(cleaned: &str) -> Vec<u8> {
    cleaned.chars().filter_map(index_of).collect()
}

/// Render a string for a step line, substituting `(empty)` for nothing
pub fn or_empty(text: &str) -> &str {
    if text.is_empty() { "(empty)" } else { text }
}
