//! Hill cipher with a 2x2 key matrix over Z/26

use crate::alphabet;
use crate::error::{EngineError, Result};
use crate::modular::Matrix2x2;
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Parameters for one Hill run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HillParams {
    /// Input text; must contain at least one letter
    pub text: String,
    /// Key matrix, entries already reduced mod 26
    pub matrix: Matrix2x2,
    /// Direction
    pub mode: Mode,
}

/// Clean `text` and pad it with `X` to an even length
pub fn prepare(text: &str) -> String {
    let mut cleaned = alphabet::clean(text);
    if cleaned.len() % 2 == 1 {
        cleaned.push('X');
    }
    cleaned
}

/// Encrypt text under `matrix`
pub fn encrypt(text: &str, matrix: Matrix2x2) -> Result<String> {
    run(
        &HillParams {
            text: text.to_string(),
            matrix,
            mode: Mode::Encrypt,
        },
        &mut NoopRecorder,
    )
}

/// Decrypt text under `matrix`
pub fn decrypt(text: &str, matrix: Matrix2x2) -> Result<String> {
    run(
        &HillParams {
            text: text.to_string(),
            matrix,
            mode: Mode::Decrypt,
        },
        &mut NoopRecorder,
    )
}

/// Run with step recording
///
/// The key must be invertible in both directions, so a matrix that could
/// never decrypt is rejected up front.
pub fn run(params: &HillParams, rec: &mut dyn StepRecorder) -> Result<String> {
    let prepared = prepare(&params.text);
    if prepared.is_empty() {
        return Err(EngineError::validation(
            "text",
            "must contain at least one letter",
        ));
    }

    let inverse = params.matrix.inverse()?;
    let used = match params.mode {
        Mode::Encrypt => params.matrix,
        Mode::Decrypt => inverse.inverse,
    };

    let letters: Vec<char> = prepared.chars().collect();
    let blocks: Vec<String> = letters.chunks(2).map(|b| b.iter().collect()).collect();
    rec.record(format!("Prepared text: {}", blocks.join(" ")));
    rec.record(format!("Matrix used: {used}"));
    match params.mode {
        Mode::Encrypt => rec.record("Using key matrix for encryption.".to_string()),
        Mode::Decrypt => rec.record(format!(
            "Determinant: {}, inverse det: {}",
            inverse.determinant, inverse.det_inverse
        )),
    }

    let values = alphabet::indices(&prepared);
    let mut output = String::with_capacity(prepared.len());
    for (block, pair) in blocks.iter().zip(values.chunks_exact(2)) {
        let (v0, v1) = (u64::from(pair[0]), u64::from(pair[1]));
        let (x0, x1) = used.apply(v0, v1);
        let (c0, c1) = (alphabet::letter_at(x0), alphabet::letter_at(x1));
        rec.record_with(|| format!("{block} [{v0}, {v1}] -> [{x0}, {x1}] {c0}{c1}"));
        output.push(c0);
        output.push(c1);
    }

    rec.record(format!("Result: {output}"));
    Ok(output)
}
