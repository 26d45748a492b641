//! Step-traced cipher engine
//!
//! Given an algorithm identifier and a map of named parameters, this crate
//! runs one classical, number-theory, digest or signature algorithm and
//! returns the final output together with an ordered trace of the
//! intermediate computation.
//!
//! # Components
//!
//! - **Alphabet and arithmetic**: [`alphabet`] maps text onto the 26-letter
//!   ring, [`modular`] provides modulo, inverses, exponentiation and 2x2
//!   matrices over Z/26
//! - **Classical ciphers**: Caesar, Vigenère, Playfair, Hill, Rail Fence and
//!   Columnar Transposition in [`classical`]
//! - **Feistel demo**: single-byte network in [`feistel`]
//! - **Number theory**: RSA, Diffie-Hellman and DSS in [`number_theory`]
//! - **Digests**: MD5 and SHA-1 in [`digest`]
//! - **Dispatch**: schema-checked entry point in [`dispatch`]
//!
//! Every algorithm writes its steps to a [`StepRecorder`]. Use
//! [`NoopRecorder`] when only the output is needed.
//!
//! All algorithms are toy-scale teaching material. None of them is secure.
//!
//! # Examples
//!
//! ## Running by id
//!
//! ```
//! use cipherlab_engine::{Dispatcher, params};
//!
//! let result = Dispatcher::default().run("caesar", &params! {
//!     "text" => "HELLO WORLD",
//!     "shift" => 3_i64,
//! });
//! assert_eq!(result.output(), Some("KHOORZRUOG"));
//! ```
//!
//! ## Calling an algorithm directly
//!
//! ```
//! use cipherlab_engine::number_theory::RsaKeyPair;
//!
//! let keys = RsaKeyPair::derive(61, 53, 17).unwrap();
//! assert_eq!(keys.d, 2753);
//! assert_eq!(keys.encrypt(65), 2790);
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod alphabet;
pub mod classical;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod feistel;
pub mod modular;
pub mod number_theory;
pub mod params;
pub mod recorder;

pub use dispatch::{AlgorithmRequest, Dispatcher, RunResult};
pub use error::{EngineError, Result};
pub use params::{AlgorithmId, EngineLimits, FieldSpec, Mode, ParamValue, ParameterMap};
pub use recorder::{NoopRecorder, StepRecorder, StepTrace};
