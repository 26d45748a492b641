//! Algorithm dispatch
//!
//! [`AlgorithmRequest`] is the typed form of one request: a raw
//! [`ParameterMap`] is read against the algorithm's schema into exactly one
//! variant, and running it is a single exhaustive match. [`Dispatcher`] wraps
//! that in the `{output, steps}` / `{error}` result shape.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use crate::classical::{
    CaesarParams, ColumnarParams, HillParams, PlayfairParams, RailFenceParams, VigenereParams,
    caesar, columnar, hill, playfair, rail_fence, vigenere,
};
use crate::digest::{self, md5::Md5State, sha1::Sha1State};
use crate::error::{EngineError, Result};
use crate::feistel::{self, FeistelParams};
use crate::modular::Matrix2x2;
use crate::number_theory::{DhParams, DssParams, RsaParams, diffie_hellman, dss, rsa};
use crate::params::{AlgorithmId, EngineLimits, ParamReader, ParameterMap};
use crate::recorder::{StepRecorder, StepTrace};

/// A fully validated request for one algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmRequest {
    /// Caesar shift
    Caesar(CaesarParams),
    /// Playfair
    Playfair(PlayfairParams),
    /// Hill 2x2
    Hill(HillParams),
    /// Vigenère
    Vigenere(VigenereParams),
    /// Rail Fence (`rail` with variant `rail`)
    RailFence(RailFenceParams),
    /// Columnar Transposition (`rail` with variant `columnar`)
    Columnar(ColumnarParams),
    /// Toy Feistel (`des`)
    Feistel(FeistelParams),
    /// RSA
    Rsa(RsaParams),
    /// Diffie-Hellman
    Dh(DhParams),
    /// MD5 of the text
    Md5(String),
    /// SHA-1 of the text
    Sha1(String),
    /// DSS sign and verify
    Dss(DssParams),
}

fn small<T: TryFrom<u64>>(name: &str, value: u64) -> Result<T> {
    T::try_from(value).map_err(|_| EngineError::validation(name, format!("{value} is out of range")))
}

impl AlgorithmRequest {
    /// Read `map` against the schema of `algorithm`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] for missing, malformed or
    /// out-of-range fields.
    pub fn parse(algorithm: AlgorithmId, map: &ParameterMap, limits: EngineLimits) -> Result<Self> {
        let r = ParamReader::new(algorithm, map, limits);
        Ok(match algorithm {
            AlgorithmId::Caesar => Self::Caesar(CaesarParams {
                text: r.text("text")?,
                shift: r.number("shift")?,
                mode: r.mode()?,
            }),
            AlgorithmId::Playfair => Self::Playfair(PlayfairParams {
                text: r.text("text")?,
                key: r.text("key")?,
                mode: r.mode()?,
            }),
            AlgorithmId::Hill => Self::Hill(HillParams {
                text: r.text("text")?,
                matrix: Matrix2x2::parse(&r.text("matrix")?)?,
                mode: r.mode()?,
            }),
            AlgorithmId::Vigenere => Self::Vigenere(VigenereParams {
                text: r.text("text")?,
                key: r.text("key")?,
                mode: r.mode()?,
            }),
            AlgorithmId::Rail => match r.choice("variant")? {
                "columnar" => Self::Columnar(ColumnarParams {
                    text: r.text("text")?,
                    key: r.text("key")?,
                    mode: r.mode()?,
                }),
                _ => Self::RailFence(RailFenceParams {
                    text: r.text("text")?,
                    rails: small("rails", r.number("rails")?)?,
                    mode: r.mode()?,
                }),
            },
            AlgorithmId::Des => Self::Feistel(FeistelParams {
                block: small("plaintext", r.number("plaintext")?)?,
                key: small("key", r.number("key")?)?,
                rounds: small("rounds", r.number("rounds")?)?,
                mode: r.mode()?,
            }),
            AlgorithmId::Rsa => Self::Rsa(RsaParams {
                p: r.number("p")?,
                q: r.number("q")?,
                e: r.number("e")?,
                message: r.number("message")?,
            }),
            AlgorithmId::Dh => Self::Dh(DhParams {
                p: r.number("p")?,
                g: r.number("g")?,
                a: r.number("a")?,
                b: r.number("b")?,
            }),
            AlgorithmId::Md5 => Self::Md5(r.optional_text("text")?),
            AlgorithmId::Sha1 => Self::Sha1(r.optional_text("text")?),
            AlgorithmId::Dss => Self::Dss(DssParams {
                p: r.number("p")?,
                q: r.number("q")?,
                g: r.number("g")?,
                x: r.number("x")?,
                k: r.number("k")?,
                message: r.optional_text("message")?,
            }),
        })
    }

    /// Wire identifier this request was parsed from
    pub const fn algorithm(&self) -> AlgorithmId {
        match self {
            Self::Caesar(_) => AlgorithmId::Caesar,
            Self::Playfair(_) => AlgorithmId::Playfair,
            Self::Hill(_) => AlgorithmId::Hill,
            Self::Vigenere(_) => AlgorithmId::Vigenere,
            Self::RailFence(_) | Self::Columnar(_) => AlgorithmId::Rail,
            Self::Feistel(_) => AlgorithmId::Des,
            Self::Rsa(_) => AlgorithmId::Rsa,
            Self::Dh(_) => AlgorithmId::Dh,
            Self::Md5(_) => AlgorithmId::Md5,
            Self::Sha1(_) => AlgorithmId::Sha1,
            Self::Dss(_) => AlgorithmId::Dss,
        }
    }

    /// Run the algorithm, narrating into `rec`; returns the output string
    pub fn execute(&self, rec: &mut dyn StepRecorder) -> Result<String> {
        match self {
            Self::Caesar(p) => caesar::run(p, rec),
            Self::Playfair(p) => playfair::run(p, rec),
            Self::Hill(p) => hill::run(p, rec),
            Self::Vigenere(p) => vigenere::run(p, rec),
            Self::RailFence(p) => rail_fence::run(p, rec),
            Self::Columnar(p) => columnar::run(p, rec),
            Self::Feistel(p) => feistel::run(p, rec).map(|byte| byte.to_string()),
            Self::Rsa(p) => rsa::run(p, rec).map(|o| o.to_string()),
            Self::Dh(p) => diffie_hellman::run(p, rec).map(|o| o.to_string()),
            Self::Md5(text) => Ok(digest::run::<Md5State>(text, rec)),
            Self::Sha1(text) => Ok(digest::run::<Sha1State>(text, rec)),
            Self::Dss(p) => dss::run(p, rec).map(|o| o.to_string()),
        }
    }
}

/// Outcome of one run: output with steps, or an error message, never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunResult {
    /// Successful run
    Success {
        /// Final output string
        output: String,
        /// Steps in computation order
        steps: StepTrace,
    },
    /// Failed run
    Failure {
        /// Human-readable description
        error: String,
    },
}

impl RunResult {
    /// True for [`RunResult::Success`]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Output string of a successful run
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success { output, .. } => Some(output),
            Self::Failure { .. } => None,
        }
    }

    /// Steps of a successful run
    pub fn steps(&self) -> Option<&StepTrace> {
        match self {
            Self::Success { steps, .. } => Some(steps),
            Self::Failure { .. } => None,
        }
    }

    /// Error message of a failed run
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

impl From<Result<(String, StepTrace)>> for RunResult {
    fn from(result: Result<(String, StepTrace)>) -> Self {
        match result {
            Ok((output, steps)) => Self::Success { output, steps },
            Err(e) => Self::Failure {
                error: e.to_string(),
            },
        }
    }
}

/// Stateless entry point mapping an algorithm id and raw parameters to a result
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    limits: EngineLimits,
}

impl Dispatcher {
    /// Create a dispatcher enforcing `limits`
    pub const fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    /// Limits applied to every request
    pub const fn limits(&self) -> EngineLimits {
        self.limits
    }

    /// Run `algorithm` given as its wire id
    pub fn run(&self, algorithm: &str, params: &ParameterMap) -> RunResult {
        match algorithm.parse::<AlgorithmId>() {
            Ok(id) => self.run_id(id, params),
            Err(e) => {
                warn!(algorithm, "unknown algorithm");
                RunResult::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Run a known algorithm and collect its steps
    pub fn run_id(&self, id: AlgorithmId, params: &ParameterMap) -> RunResult {
        let mut trace = StepTrace::new();
        // The trace is dropped on failure, so it can be written directly.
        self.run_unstaged(id, params, &mut trace)
            .map(|output| (output, trace))
            .into()
    }

    /// Validate, then run with a caller-supplied recorder.
    ///
    /// Steps reach `rec` only when the run succeeds; a failed run leaves it
    /// untouched.
    pub fn run_with(
        &self,
        id: AlgorithmId,
        params: &ParameterMap,
        rec: &mut dyn StepRecorder,
    ) -> Result<String> {
        if !rec.is_recording() {
            return self.run_unstaged(id, params, rec);
        }

        let mut staged = StepTrace::new();
        let output = self.run_unstaged(id, params, &mut staged)?;
        for step in staged.into_steps() {
            rec.record(step);
        }
        Ok(output)
    }

    fn run_unstaged(
        &self,
        id: AlgorithmId,
        params: &ParameterMap,
        rec: &mut dyn StepRecorder,
    ) -> Result<String> {
        let span = debug_span!("run", algorithm = %id);
        let _enter = span.enter();

        let request = AlgorithmRequest::parse(id, params, self.limits).inspect_err(|e| {
            warn!(error = %e, "rejected parameters");
        })?;

        match request.execute(rec) {
            Ok(output) => {
                debug!(output_len = output.len(), "run completed");
                Ok(output)
            }
            Err(e) => {
                warn!(error = %e, "run failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::params;
    use crate::params::Mode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rail_variants() {
        let map = params! { "text" => "abc", "rails" => 3_i64 };
        let request = AlgorithmRequest::parse(AlgorithmId::Rail, &map, EngineLimits::default()).unwrap();
        assert_eq!(
            request,
            AlgorithmRequest::RailFence(RailFenceParams {
                text: "abc".to_string(),
                rails: 3,
                mode: Mode::Encrypt,
            })
        );

        // Columnar does not need rails
        let map = params! { "text" => "abc", "variant" => "columnar", "key" => "KEY" };
        let request = AlgorithmRequest::parse(AlgorithmId::Rail, &map, EngineLimits::default()).unwrap();
        assert_eq!(request.algorithm(), AlgorithmId::Rail);
        assert!(matches!(request, AlgorithmRequest::Columnar(_)));
    }

    #[test]
    fn test_parse_des_ranges() {
        let map = params! { "plaintext" => 256_i64, "key" => 1_i64, "rounds" => 3_i64 };
        let err = AlgorithmRequest::parse(AlgorithmId::Des, &map, EngineLimits::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid plaintext: must be between 0 and 255, got 256"
        );
    }

    #[test]
    fn test_run_success_shape() {
        let result = Dispatcher::default().run("des", &params! {
            "plaintext" => 201_i64, "key" => 43_i64, "rounds" => 3_i64
        });
        assert_eq!(result.output(), Some("228"));
        assert_eq!(result.steps().map(StepTrace::len), Some(6));
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_failure_has_no_steps() {
        let mut trace = StepTrace::new();
        let err = Dispatcher::default()
            .run_with(AlgorithmId::Caesar, &params! { "text" => "HI", "shift" => 30_i64 }, &mut trace)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
        assert!(trace.is_empty());
    }

    #[test]
    fn test_unknown_algorithm() {
        let result = Dispatcher::default().run("enigma", &ParameterMap::new());
        assert_eq!(result.error(), Some("Unknown algorithm: enigma"));
    }

    #[test]
    fn test_result_json_shapes() {
        let ok = RunResult::Success {
            output: "X".to_string(),
            steps: StepTrace::new(),
        };
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"output":"X","steps":[]}"#
        );
        let err = RunResult::Failure {
            error: "bad".to_string(),
        };
        assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"bad"}"#);

        let back: RunResult = serde_json::from_str(r#"{"error":"bad"}"#).unwrap();
        assert_eq!(back, err);
    }
}
