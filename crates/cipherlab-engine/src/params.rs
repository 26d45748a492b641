//! Algorithm identifiers, raw parameter maps and per-algorithm field schemas
//!
//! Callers send a loosely typed [`ParameterMap`]. Each [`AlgorithmId`] owns a
//! static table of [`FieldSpec`]s; [`ParamReader`] coerces raw values against
//! that table so range rules live in exactly one place.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// The closed set of algorithms the engine runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    /// Caesar shift
    Caesar,
    /// Playfair digraph cipher
    Playfair,
    /// 2x2 Hill cipher
    Hill,
    /// Vigenère cipher
    Vigenere,
    /// Rail Fence or Columnar Transposition
    Rail,
    /// Toy single-byte Feistel network
    Des,
    /// Textbook RSA
    Rsa,
    /// Diffie-Hellman key agreement
    Dh,
    /// MD5 digest
    Md5,
    /// SHA-1 digest
    Sha1,
    /// DSA-style signature
    Dss,
}

impl AlgorithmId {
    /// Every algorithm, in menu order
    pub const ALL: [Self; 11] = [
        Self::Caesar,
        Self::Playfair,
        Self::Hill,
        Self::Vigenere,
        Self::Rail,
        Self::Des,
        Self::Rsa,
        Self::Dh,
        Self::Md5,
        Self::Sha1,
        Self::Dss,
    ];

    /// Wire identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caesar => "caesar",
            Self::Playfair => "playfair",
            Self::Hill => "hill",
            Self::Vigenere => "vigenere",
            Self::Rail => "rail",
            Self::Des => "des",
            Self::Rsa => "rsa",
            Self::Dh => "dh",
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Dss => "dss",
        }
    }

    /// Human-readable name
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Caesar => "Caesar Cipher",
            Self::Playfair => "Playfair Cipher",
            Self::Hill => "Hill Cipher",
            Self::Vigenere => "Vigenere Cipher",
            Self::Rail => "Rail Fence + Columnar",
            Self::Des => "DES (Toy Demo)",
            Self::Rsa => "RSA",
            Self::Dh => "Diffie-Hellman",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Dss => "DSS (DSA Demo)",
        }
    }

    /// Field schema for this algorithm
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Caesar => CAESAR_FIELDS,
            Self::Playfair => PLAYFAIR_FIELDS,
            Self::Hill => HILL_FIELDS,
            Self::Vigenere => VIGENERE_FIELDS,
            Self::Rail => RAIL_FIELDS,
            Self::Des => DES_FIELDS,
            Self::Rsa => RSA_FIELDS,
            Self::Dh => DH_FIELDS,
            Self::Md5 | Self::Sha1 => DIGEST_FIELDS,
            Self::Dss => DSS_FIELDS,
        }
    }

    /// Look up one field by name
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

/// A raw parameter value as received from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// JSON number
    Number(serde_json::Number),
    /// JSON string
    Text(String),
    /// Anything else (null, bool, array, object)
    Other(serde_json::Value),
}

impl ParamValue {
    fn is_null(&self) -> bool {
        matches!(self, Self::Other(serde_json::Value::Null))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Parameter name to raw value, supplied per invocation
pub type ParameterMap = BTreeMap<String, ParamValue>;

/// Build a [`ParameterMap`] from `name => value` pairs.
///
/// ```
/// use cipherlab_engine::params;
///
/// let map = params! { "text" => "HELLO", "shift" => 3_i64 };
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let mut map = $crate::params::ParameterMap::new();
        $(map.insert(String::from($name), $crate::params::ParamValue::from($value));)*
        map
    }};
}

/// Kind of input a field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text
    Text,
    /// Integer
    Number,
    /// One of a fixed set of options
    Choice,
}

/// Default value shown to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    /// Text default
    Text(&'static str),
    /// Numeric default
    Number(i64),
}

/// Schema entry for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Parameter name
    pub name: &'static str,
    /// Label for form rendering
    pub label: &'static str,
    /// Expected kind
    pub kind: FieldKind,
    /// Default the UI pre-fills
    pub default: FieldDefault,
    /// Inclusive lower bound for numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound for numbers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Allowed values for choices
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    /// Whether the caller must supply the field
    pub required: bool,
}

impl FieldSpec {
    const fn text(name: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            default: FieldDefault::Text(default),
            min: None,
            max: None,
            options: &[],
            required: true,
        }
    }

    const fn number(
        name: &'static str,
        label: &'static str,
        default: i64,
        min: i64,
        max: i64,
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            default: FieldDefault::Number(default),
            min: Some(min),
            max: Some(max),
            options: &[],
            required: true,
        }
    }

    const fn choice(
        name: &'static str,
        label: &'static str,
        default: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Choice,
            default: FieldDefault::Text(default),
            min: None,
            max: None,
            options,
            required: false,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

const MODES: &[&str] = &["encrypt", "decrypt"];
const MODE: FieldSpec = FieldSpec::choice("mode", "Mode", "encrypt", MODES);
const U32_MAX: i64 = u32::MAX as i64;

const CAESAR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("text", "Text", "HELLO WORLD"),
    FieldSpec::number("shift", "Shift (0-25)", 3, 0, 25),
    MODE,
];

const PLAYFAIR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("text", "Text", "HIDE THE GOLD"),
    FieldSpec::text("key", "Key", "MONARCHY"),
    MODE,
];

const HILL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("text", "Text", "ATTACK"),
    FieldSpec::text("matrix", "Key matrix (a,b,c,d)", "3,3,2,5"),
    MODE,
];

const VIGENERE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("text", "Text", "DEFEND THE EAST"),
    FieldSpec::text("key", "Key", "LEMON"),
    MODE,
];

const RAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("text", "Text", "WE ARE DISCOVERED"),
    FieldSpec::choice("variant", "Variant", "rail", &["rail", "columnar"]),
    FieldSpec::number("rails", "Rails (Rail Fence)", 3, 2, 64),
    FieldSpec::text("key", "Key (Columnar)", "ZEBRA"),
    MODE,
];

const DES_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("plaintext", "Plaintext byte (0-255)", 201, 0, 255),
    FieldSpec::number("key", "Key byte (0-255)", 43, 0, 255),
    FieldSpec::number("rounds", "Rounds (1-6)", 3, 1, 6),
    MODE,
];

const RSA_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("p", "Prime p", 61, 2, 65_535),
    FieldSpec::number("q", "Prime q", 53, 2, 65_535),
    FieldSpec::number("e", "Public exponent e", 17, 2, U32_MAX),
    FieldSpec::number("message", "Message (number)", 65, 0, U32_MAX),
];

const DH_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("p", "Prime p", 23, 3, U32_MAX),
    FieldSpec::number("g", "Generator g", 5, 2, U32_MAX),
    FieldSpec::number("a", "Private a", 6, 1, U32_MAX),
    FieldSpec::number("b", "Private b", 15, 1, U32_MAX),
];

const DIGEST_FIELDS: &[FieldSpec] = &[FieldSpec::text("text", "Message", "security lab").optional()];

const DSS_FIELDS: &[FieldSpec] = &[
    FieldSpec::number("p", "Prime p", 59, 3, U32_MAX),
    FieldSpec::number("q", "Prime q", 29, 2, U32_MAX),
    FieldSpec::number("g", "Generator g", 4, 2, U32_MAX),
    FieldSpec::number("x", "Private key x", 7, 1, U32_MAX),
    FieldSpec::number("k", "Nonce k", 9, 1, U32_MAX),
    FieldSpec::text("message", "Message", "verify me").optional(),
];

/// Cipher direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plaintext to ciphertext
    #[default]
    Encrypt,
    /// Ciphertext to plaintext
    Decrypt,
}

/// Limits applied while reading parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Longest accepted text field, in characters
    pub max_text_chars: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_text_chars: 10_000,
        }
    }
}

/// Reads and coerces raw parameters against an algorithm's schema
#[derive(Debug, Clone, Copy)]
pub struct ParamReader<'a> {
    algorithm: AlgorithmId,
    map: &'a ParameterMap,
    limits: EngineLimits,
}

impl<'a> ParamReader<'a> {
    /// Create a reader for `algorithm` over `map`
    pub const fn new(algorithm: AlgorithmId, map: &'a ParameterMap, limits: EngineLimits) -> Self {
        Self {
            algorithm,
            map,
            limits,
        }
    }

    fn spec(&self, name: &str) -> Result<&'static FieldSpec> {
        self.algorithm.field(name).ok_or_else(|| {
            EngineError::Inconsistent(format!("{} has no field named {name}", self.algorithm))
        })
    }

    fn raw(&self, name: &str) -> Option<&'a ParamValue> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// Required text field
    pub fn text(&self, name: &str) -> Result<String> {
        self.spec(name)?;
        match self.raw(name) {
            Some(value) => self.coerce_text(name, value),
            None => Err(EngineError::validation(name, "is required")),
        }
    }

    /// Optional text field, empty when absent
    pub fn optional_text(&self, name: &str) -> Result<String> {
        self.spec(name)?;
        self.raw(name)
            .map_or_else(|| Ok(String::new()), |value| self.coerce_text(name, value))
    }

    fn coerce_text(&self, name: &str, value: &ParamValue) -> Result<String> {
        let text = match value {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Other(_) => return Err(EngineError::validation(name, "must be text")),
        };
        if text.chars().count() > self.limits.max_text_chars {
            return Err(EngineError::validation(
                name,
                format!("longer than {} characters", self.limits.max_text_chars),
            ));
        }
        Ok(text)
    }

    /// Required integer field, checked against the schema range
    pub fn number(&self, name: &str) -> Result<u64> {
        let spec = self.spec(name)?;
        let value = match self.raw(name) {
            Some(value) => coerce_integer(name, value)?,
            None => return Err(EngineError::validation(name, "is required")),
        };

        let min = spec.min.unwrap_or(0);
        let max = spec.max.unwrap_or(i64::MAX);
        if value < min || value > max {
            return Err(EngineError::validation(
                name,
                format!("must be between {min} and {max}, got {value}"),
            ));
        }
        u64::try_from(value).map_err(|_| EngineError::validation(name, "must not be negative"))
    }

    /// Choice field; falls back to the schema default when absent
    pub fn choice(&self, name: &str) -> Result<&'static str> {
        let spec = self.spec(name)?;
        let FieldDefault::Text(default) = spec.default else {
            return Err(EngineError::Inconsistent(format!("{name} is not a choice")));
        };
        let Some(raw) = self.raw(name) else {
            return Ok(default);
        };
        let ParamValue::Text(value) = raw else {
            return Err(EngineError::validation(name, "must be text"));
        };
        spec.options
            .iter()
            .copied()
            .find(|option| *option == value.as_str())
            .ok_or_else(|| {
                EngineError::validation(
                    name,
                    format!("must be one of {}, got '{value}'", spec.options.join(", ")),
                )
            })
    }

    /// The `mode` field, defaulting to encrypt
    pub fn mode(&self) -> Result<Mode> {
        Ok(match self.choice("mode")? {
            "decrypt" => Mode::Decrypt,
            _ => Mode::Encrypt,
        })
    }
}

fn coerce_integer(name: &str, value: &ParamValue) -> Result<i64> {
    let not_integer = || EngineError::validation(name, "must be an integer");
    match value {
        ParamValue::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.as_u64().is_some() {
                Err(EngineError::validation(name, "is too large"))
            } else {
                let f = n.as_f64().ok_or_else(not_integer)?;
                if f.fract() == 0.0 && f.abs() < 9.0e15 {
                    Ok(f as i64)
                } else {
                    Err(not_integer())
                }
            }
        }
        ParamValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(EngineError::validation(name, "is required"));
            }
            trimmed.parse().map_err(|_| not_integer())
        }
        ParamValue::Other(_) => Err(not_integer()),
    }
}
