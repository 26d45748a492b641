//! Vigenère cipher with a cycled key stream

use crate::alphabet::{self, RING};
use crate::error::{EngineError, Result};
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Parameters for one Vigenère run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VigenereParams {
    /// Input text, cleaned before use
    pub text: String,
    /// Key, cleaned before use; must contain a letter
    pub key: String,
    /// Direction
    pub mode: Mode,
}

/// Key letters cycled to `len` positions: `stream[i] = key[i mod key.len()]`
pub fn key_stream(cleaned_key: &str, len: usize) -> String {
    cleaned_key.chars().cycle().take(len).collect()
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
pub fn run(params: &VigenereParams, rec: &mut dyn StepRecorder) -> Result<String> {
    transform(&params.text, &params.key, params.mode, rec)
}

fn transform(text: &str, key: &str, mode: Mode, rec: &mut dyn StepRecorder) -> Result<String> {
    let cleaned = alphabet::clean(text);
    let cleaned_key = alphabet::clean(key);
    if cleaned_key.is_empty() {
        return Err(EngineError::validation(
            "key",
            "must contain at least one letter",
        ));
    }

    let stream = key_stream(&cleaned_key, cleaned.len());
    rec.record(format!("Normalized text: {}", alphabet::or_empty(&cleaned)));
    rec.record(format!("Key stream: {}", alphabet::or_empty(&stream)));

    let op = match mode {
        Mode::Encrypt => '+',
        Mode::Decrypt => '-',
    };

    let mut output = String::with_capacity(cleaned.len());
    for ((t, k), (ti, ki)) in cleaned
        .chars()
        .zip(stream.chars())
        .zip(alphabet::indices(&cleaned).into_iter().zip(alphabet::indices(&stream)))
    {
        let (ti, ki) = (u64::from(ti), u64::from(ki));
        let value = match mode {
            Mode::Encrypt => (ti + ki) % RING,
            Mode::Decrypt => (ti + RING - ki) % RING,
        };
        let out = alphabet::letter_at(value);
        rec.record_with(|| format!("{t} {op} {k}: ({ti} {op} {ki}) mod 26 = {value} -> {out}"));
        output.push(out);
    }

    rec.record(format!("Result: {}", alphabet::or_empty(&output)));
    Ok(output)
}
