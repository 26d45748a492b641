//! Caesar shift cipher

use crate::alphabet::{self, RING};
use crate::error::Result;
use crate::params::Mode;
use crate::recorder::StepRecorder;

/// Parameters for one Caesar run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaesarParams {
    /// Input text, cleaned before use
    pub text: String,
    /// Shift in `[0, 26)`
    pub shift: u64,
    /// Direction
    pub mode: Mode,
}

/// Effective forward shift for a mode; decryption shifts by `26 - shift`
pub fn effective_shift(shift: u64, mode: Mode) -> u64 {
    let shift = shift % RING;
    match mode {
        Mode::Encrypt => shift,
        Mode::Decrypt => (RING - shift) % RING,
    }
}

/// Shift every letter of already cleaned text forward by `shift`
pub fn shift_cleaned(cleaned: &str, shift: u64) -> String {
    alphabet::indices(cleaned)
        .into_iter()
        .map(|i| alphabet::letter_at(u64::from(i) + shift))
        .collect()
}

/// Encrypt text with the given shift
pub fn encrypt(text: &str, shift: u64) -> String {
    shift_cleaned(&alphabet::clean(text), effective_shift(shift, Mode::Encrypt))
}

/// Decrypt text with the given shift
pub fn decrypt(text: &str, shift: u64) -> String {
    shift_cleaned(&alphabet::clean(text), effective_shift(shift, Mode::Decrypt))
}

/// Run with step recording
pub fn run(params: &CaesarParams, rec: &mut dyn StepRecorder) -> Result<String> {
    let cleaned = alphabet::clean(&params.text);
    let step = effective_shift(params.shift, params.mode);

    rec.record(format!("Normalized text: {}", alphabet::or_empty(&cleaned)));
    rec.record(format!("Shift applied: {step}"));

    let mut output = String::with_capacity(cleaned.len());
    for (letter, index) in cleaned.chars().zip(alphabet::indices(&cleaned)) {
        let shifted = (u64::from(index) + step) % RING;
        let out = alphabet::letter_at(shifted);
        rec.record_with(|| format!("{letter}: {index} -> ({index} + {step}) mod 26 = {shifted} -> {out}"));
        output.push(out);
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
    fn test_hello_world() {
        assert_eq!(encrypt("HELLO WORLD", 3), "KHOORZRUOG");
        assert_eq!(decrypt("KHOOR ZRUOG", 3), "HELLOWORLD");
    }

    #[test]
    fn test_decrypt_shift_zero() {
        assert_eq!(effective_shift(0, Mode::Decrypt), 0);
        assert_eq!(decrypt("abc", 0), "ABC");
    }

    #[test]
    fn test_run_steps() {
        let params = CaesarParams {
            text: "Hi!".to_string(),
            shift: 3,
            mode: Mode::Encrypt,
        };
        let mut trace = StepTrace::new();
        let out = run(&params, &mut trace).unwrap();
        assert_eq!(out, "KL");
        assert_eq!(
            trace.steps(),
            [
                "Normalized text: HI",
                "Shift applied: 3",
                "H: 7 -> (7 + 3) mod 26 = 10 -> K",
                "I: 8 -> (8 + 3) mod 26 = 11 -> L",
                "Result: KL",
            ]
        );
    }

    #[test]
    fn test_run_decrypt_reports_inverse_shift() {
        let params = CaesarParams {
            text: "KHOOR".to_string(),
            shift: 3,
            mode: Mode::Decrypt,
        };
        let mut trace = StepTrace::new();
        assert_eq!(run(&params, &mut trace).unwrap(), "HELLO");
        assert_eq!(trace.steps()[1], "Shift applied: 23");
    }

    #[test]
    fn test_empty_text() {
        let params = CaesarParams {
            text: "1234".to_string(),
            shift: 5,
            mode: Mode::Encrypt,
        };
        let mut trace = StepTrace::new();
        assert_eq!(run(&params, &mut trace).unwrap(), "");
        assert_eq!(trace.steps()[0], "Normalized text: (empty)");
        assert_eq!(trace.steps()[2], "Result: (empty)");
    }

    proptest! {
        #[test]
        fn decrypt_inverts_encrypt(text in "[A-Z]{0,64}", shift in 0u64..26) {
            prop_assert_eq!(decrypt(&encrypt(&text, shift), shift), text);
        }
    }
}
