//! Rail Fence transposition

use crate::alphabet;
use crate::error::{EngineError, Result};
use crate::params::Mode;
use crate::recorder::{NoopRecorder, StepRecorder};

/// Parameters for one Rail Fence run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RailFenceParams {
    /// Input text, cleaned before use
    pub text: String,
    /// Number of rails, at least 2
    pub rails: usize,
    /// Direction
    pub mode: Mode,
}

/// Rail index for each of `len` positions, bouncing between 0 and `rails - 1`
pub fn zigzag(len: usize, rails: usize) -> Vec<usize> {
    let mut pattern = Vec::with_capacity(len);
    let mut rail = 0;
    let mut down = true;
    for _ in 0..len {
        pattern.push(rail);
        if rails > 1 {
            if rail == 0 {
                down = true;
            } else if rail == rails - 1 {
                down = false;
            }
            if down {
                rail += 1;
            } else {
                rail -= 1;
            }
        }
    }
    pattern
}

/// Encrypt text across `rails` rails
pub fn encrypt(text: &str, rails: usize) -> Result<String> {
    transform(text, rails, Mode::Encrypt, &mut NoopRecorder)
}

/// Decrypt text written across `rails` rails
pub fn decrypt(text: &str, rails: usize) -> Result<String> {
    transform(text, rails, Mode::Decrypt, &mut NoopRecorder)
}

/// Run with step recording
pub fn run(params: &RailFenceParams, rec: &mut dyn StepRecorder) -> Result<String> {
    transform(&params.text, params.rails, params.mode, rec)
}

fn transform(text: &str, rails: usize, mode: Mode, rec: &mut dyn StepRecorder) -> Result<String> {
    if rails < 2 {
        return Err(EngineError::validation(
            "rails",
            format!("must be at least 2, got {rails}"),
        ));
    }

    let cleaned = alphabet::clean(text);
    let letters: Vec<char> = cleaned.chars().collect();
    let pattern = zigzag(letters.len(), rails);

    rec.record(format!("Normalized text: {}", alphabet::or_empty(&cleaned)));
    rec.record(format!("Rails: {rails}"));

    let mut rows: Vec<String> = vec![String::new(); rails];
    let output: String = match mode {
        Mode::Encrypt => {
            for (&rail, &c) in pattern.iter().zip(&letters) {
                rows[rail].push(c);
            }
            rows.concat()
        }
        Mode::Decrypt => {
            // Positions in the order the ciphertext lists them: rail by rail.
            let mut order: Vec<usize> = (0..letters.len()).collect();
            order.sort_by_key(|&pos| pattern[pos]);

            let mut plain = vec![' '; letters.len()];
            for (&pos, &c) in order.iter().zip(&letters) {
                plain[pos] = c;
                rows[pattern[pos]].push(c);
            }
            plain.into_iter().collect()
        }
    };

    for (i, row) in rows.iter().enumerate() {
        rec.record_with(|| format!("Rail {}: {}", i + 1, alphabet::or_empty(row)));
    }
    rec.record(format!("Result: {}", alphabet::or_empty(&output)));
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::recorder::StepTrace;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag(7, 3), [0, 1, 2, 1, 0, 1, 2]);
        assert_eq!(zigzag(5, 2), [0, 1, 0, 1, 0]);
        assert!(zigzag(0, 4).is_empty());
    }

    #[test]
    fn test_we_are_discovered() {
        assert_eq!(encrypt("WE ARE DISCOVERED", 3).unwrap(), "WECRERDSOEEAIVD");
        assert_eq!(decrypt("WECRERDSOEEAIVD", 3).unwrap(), "WEAREDISCOVERED");
    }

    #[test]
    fn test_more_rails_than_letters() {
        assert_eq!(encrypt("abc", 10).unwrap(), "ABC");
        assert_eq!(decrypt("ABC", 10).unwrap(), "ABC");
    }

    #[test]
    fn test_too_few_rails() {
        let err = encrypt("HELLO", 1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid rails: must be at least 2, got 1");
    }

    #[test]
    fn test_run_steps() {
        let params = RailFenceParams {
            text: "WE ARE DISCOVERED".to_string(),
            rails: 3,
            mode: Mode::Encrypt,
        };
        let mut trace = StepTrace::new();
        run(&params, &mut trace).unwrap();
        assert_eq!(
            trace.steps(),
            [
                "Normalized text: WEAREDISCOVERED",
                "Rails: 3",
                "Rail 1: WECR",
                "Rail 2: ERDSOEE",
                "Rail 3: AIVD",
                "Result: WECRERDSOEEAIVD",
            ]
        );
    }

    #[test]
    fn test_decrypt_rows_match_encrypt_rows() {
        let mut enc = StepTrace::new();
        let mut dec = StepTrace::new();
        let plain = "THEQUICKBROWNFOX";
        let cipher = encrypt(plain, 4).unwrap();
        transform(plain, 4, Mode::Encrypt, &mut enc).unwrap();
        transform(&cipher, 4, Mode::Decrypt, &mut dec).unwrap();
        assert_eq!(enc.steps()[2..6], dec.steps()[2..6]);
    }

    proptest! {
        #[test]
        fn decrypt_inverts_encrypt(text in "[A-Z]{0,80}", rails in 2usize..=64) {
            let cipher = encrypt(&text, rails).unwrap();
            prop_assert_eq!(decrypt(&cipher, rails).unwrap(), text);
        }
    }
}
