//! Classical ciphers over the 26-letter ring
//!
//! Each cipher exposes plain `encrypt`/`decrypt` helpers that discard the
//! trace, and a `run` entry point that narrates into a [`StepRecorder`].
//! Input text is always passed through [`crate::alphabet::clean`] first.
//!
//! [`StepRecorder`]: crate::recorder::StepRecorder

pub mod caesar;
pub mod columnar;
pub mod hill;
pub mod playfair;
pub mod rail_fence;
pub mod vigenere;

pub use caesar::CaesarParams;
pub use columnar::ColumnarParams;
pub use hill::HillParams;
pub use playfair::{KeySquare, PlayfairParams};
pub use rail_fence::RailFenceParams;
pub use vigenere::VigenereParams;
