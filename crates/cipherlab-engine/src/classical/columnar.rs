//! Columnar transposition keyed by the alphabetical order of key letters

use crate::alphabet;
use crate::error::{EngineError, Result};
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Parameters for one columnar run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnarParams {
    /// Input text, cleaned before use
    pub text: String,
    /// Key; its cleaned length is the column count
    pub key: String,
    /// Direction
    pub mode: Mode,
}

/// Column indices in read-out order: sorted by key letter, ties by position
pub fn column_order(cleaned_key: &str) -> Vec<usize> {
    let mut order: Vec<(char, usize)> = cleaned_key.chars().zip(0..).collect();
    order.sort_unstable();
    order.into_iter().map(|(_, i)| i).collect()
}

/// Encrypt text under `key`
pub fn encrypt(text: &str, key: &str) -> Result<String> {
    transform(text, key, Mode::Encrypt, &mut NoopRecorder)
}

/// Decrypt text under `key`
pub fn decrypt(text: &str, key: &str) -> Result<String> {
    transform(text, key, Mode::Decrypt, &mut NoopRecorder)
}

/// Run with step recording
pub fn run(params: &ColumnarParams, rec: &mut dyn StepRecorder) -> Result<String> {
    transform(&params.text, &params.key, params.mode, rec)
}

fn transform(text: &str, key: &str, mode: Mode, rec: &mut dyn StepRecorder) -> Result<String> {
    let cleaned_key = alphabet::clean(key);
    if cleaned_key.is_empty() {
        return Err(EngineError::validation(
            "key",
            "is required for columnar transposition",
        ));
    }

    let letters: Vec<char> = alphabet::clean(text).chars().collect();
    let cols = cleaned_key.len();
    let rows = letters.len().div_ceil(cols);
    let order = column_order(&cleaned_key);
    let key_letters: Vec<char> = cleaned_key.chars().collect();

    // Missing cells are padded with X in either direction.
    let mut grid = vec![vec!['X'; cols]; rows];
    match mode {
        Mode::Encrypt => {
            for (i, &c) in letters.iter().enumerate() {
                grid[i / cols][i % cols] = c;
            }
        }
        Mode::Decrypt => {
            let cells = order.iter().flat_map(|&col| (0..rows).map(move |row| (row, col)));
            for ((row, col), &c) in cells.zip(&letters) {
                grid[row][col] = c;
            }
        }
    }

    let rendered: Vec<String> = grid
        .iter()
        .map(|row| row.iter().map(char::to_string).collect::<Vec<_>>().join(" "))
        .collect();
    rec.record(format!("Grid: {}", alphabet::or_empty(&rendered.join(" | "))));
    rec.record(format!(
        "Order: {}",
        order.iter().map(|&i| key_letters[i]).collect::<String>()
    ));

    for &col in &order {
        rec.record_with(|| {
            let column: String = grid.iter().map(|row| row[col]).collect();
            format!(
                "Column {} ({}): {}",
                col + 1,
                key_letters[col],
                alphabet::or_empty(&column)
            )
        });
    }

    let output: String = match mode {
        Mode::Encrypt => order
            .iter()
            .flat_map(|&col| grid.iter().map(move |row| row[col]))
            .collect(),
        Mode::Decrypt => grid.iter().flatten().collect(),
    };

    rec.record(format!("Result: {}", alphabet::or_empty(&output)));
    Ok(output)
}
