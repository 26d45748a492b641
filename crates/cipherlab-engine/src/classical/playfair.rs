//! Playfair digraph cipher over a 5x5 key square
//!
//! `J` is merged into `I`, so the square holds the other 25 letters. The key's
//! cleaned letters go in first-occurrence order, followed by the rest of the
//! alphabet.

use std::fmt;

use crate::alphabet;
use crate::error::{EngineError, Result};
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Parameters for one Playfair run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayfairParams {
    /// Plaintext or ciphertext
    pub text: String,
    /// Key used to build the square; must contain a letter
    pub key: String,
    /// Direction
    pub mode: Mode,
}

/// 5x5 key square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySquare {
    cells: [[char; 5]; 5],
}

impl KeySquare {
    /// Build the square for `key`
    pub fn from_key(key: &str) -> Self {
        let mut seen = [false; 26];
        let mut letters = Vec::with_capacity(25);
        let key_letters = merge_j(&alphabet::clean(key));
        let rest = alphabet::ALPHABET
            .iter()
            .map(|&b| char::from(b))
            .filter(|&c| c != 'J');

        for c in key_letters.chars().chain(rest) {
            if let Some(i) = alphabet::index_of(c)
                && !seen[usize::from(i)]
            {
                seen[usize::from(i)] = true;
                letters.push(c);
            }
        }

        let mut cells = [[' '; 5]; 5];
        for (i, c) in letters.into_iter().enumerate() {
            cells[i / 5][i % 5] = c;
        }
        Self { cells }
    }

    /// Row and column of a letter (`J` is looked up as `I`)
    pub fn position(&self, letter: char) -> Option<(usize, usize)> {
        let letter = if letter == 'J' { 'I' } else { letter };
        self.cells.iter().enumerate().find_map(|(r, row)| {
            row.iter().position(|&c| c == letter).map(|c| (r, c))
        })
    }

    /// Letter at a grid coordinate, wrapping both axes
    pub fn at(&self, row: usize, col: usize) -> char {
        self.cells[row % 5][col % 5]
    }

    /// Rows as strings
    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for KeySquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        f.write_str(&rows.join(" | "))
    }
}

fn merge_j(cleaned: &str) -> String {
    cleaned.replace('J', "I")
}

/// Prepare plaintext for encryption: clean, merge `J` into `I`, split into
/// digraphs, inserting a filler between doubled letters and after a trailing
/// single letter. The filler is `X`, or `Q` when the letter itself is `X`.
///
/// The result always has even length and no digraph repeats a letter.
pub fn prepare(text: &str) -> String {
    let letters: Vec<char> = merge_j(&alphabet::clean(text)).chars().collect();
    let mut out = String::with_capacity(letters.len() + letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        let a = letters[i];
        match letters.get(i + 1) {
            Some(&b) if b != a => {
                out.push(a);
                out.push(b);
                i += 2;
            }
            _ => {
                out.push(a);
                out.push(if a == 'X' { 'Q' } else { 'X' });
                i += 1;
            }
        }
    }
    out
}

/// How a digraph was transformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigraphRule {
    /// Both letters share a row
    Row,
    /// Both letters share a column
    Column,
    /// Opposite corners of a rectangle
    Rectangle,
}

impl fmt::Display for DigraphRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Row => "row",
            Self::Column => "column",
            Self::Rectangle => "rectangle",
        })
    }
}

/// Transform one digraph
pub fn transform_pair(
    square: &KeySquare,
    a: char,
    b: char,
    mode: Mode,
) -> Result<(char, char, DigraphRule)> {
    let locate = |c: char| {
        square.position(c).ok_or_else(|| {
            EngineError::validation("text", format!("letter {c} is not in the key square"))
        })
    };
    let (ra, ca) = locate(a)?;
    let (rb, cb) = locate(b)?;

    // Moving back one step is moving forward four on a 5-wide grid.
    let step = match mode {
        Mode::Encrypt => 1,
        Mode::Decrypt => 4,
    };

    Ok(if ra == rb {
        (square.at(ra, ca + step), square.at(rb, cb + step), DigraphRule::Row)
    } else if ca == cb {
        (square.at(ra + step, ca), square.at(rb + step, cb), DigraphRule::Column)
    } else {
        (square.at(ra, cb), square.at(rb, ca), DigraphRule::Rectangle)
    })
}

/// Encrypt text under `key`
pub fn encrypt(text: &str, key: &str) -> Result<String> {
    transform(text, key, Mode::Encrypt, &mut NoopRecorder)
}

/// Decrypt already prepared ciphertext under `key`
pub fn decrypt(text: &str, key: &str) -> Result<String> {
    transform(text, key, Mode::Decrypt, &mut NoopRecorder)
}

/// Run with step recording
pub fn run(params: &PlayfairParams, rec: &mut dyn StepRecorder) -> Result<String> {
    transform(&params.text, &params.key, params.mode, rec)
}

fn transform(text: &str, key: &str, mode: Mode, rec: &mut dyn StepRecorder) -> Result<String> {
    if alphabet::clean(key).is_empty() {
        return Err(EngineError::validation(
            "key",
            "must contain at least one letter",
        ));
    }
    let square = KeySquare::from_key(key);

    // Ciphertext is already in digraph form, so decryption only cleans.
    let prepared = match mode {
        Mode::Encrypt => prepare(text),
        Mode::Decrypt => merge_j(&alphabet::clean(text)),
    };
    if prepared.len() % 2 != 0 {
        return Err(EngineError::validation(
            "text",
            "ciphertext must have an even number of letters",
        ));
    }

    let letters: Vec<char> = prepared.chars().collect();
    let pairs: Vec<String> = letters.chunks(2).map(|p| p.iter().collect()).collect();

    rec.record(format!("Matrix: {square}"));
    rec.record(format!("Prepared text: {}", alphabet::or_empty(&prepared)));
    rec.record(format!("Pairs: {}", alphabet::or_empty(&pairs.join(" "))));

    let mut output = String::with_capacity(prepared.len());
    for pair in letters.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        let (x, y, rule) = transform_pair(&square, a, b, mode)?;
        rec.record_with(|| format!("{a}{b} -> {x}{y} ({rule})"));
        output.push(x);
        output.push(y);
    }

    rec.record(format!("Result: {}", alphabet::or_empty(&output)));
    Ok(output)
}
