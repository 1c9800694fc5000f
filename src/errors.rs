use thiserror::Error;

/// Errors from the fallible edges of the crate.
///
/// The bit operations themselves are total; these only come from parsing,
/// narrowing, materializing huge shift amounts, and the interpreter/config
/// layers.
#[derive(Debug, Error)]
pub enum NatError {
    #[error("invalid natural number literal `{input}`: {reason}")]
    Parse { input: String, reason: String },

    #[error("value {value} does not fit in {target}")]
    Narrowing { value: String, target: &'static str },

    #[error("{op} amount {amount} is too large to materialize")]
    AmountTooLarge { op: &'static str, amount: String },

    #[error("low part {low} does not fit below bit {width}")]
    LowPartTooWide { low: String, width: u64 },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("truth table index {0} is not below 16")]
    TruthTable(u8),

    #[error("unbound variable `{0}`")]
    UnboundVar(String),

    #[error("invalid law configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type NatResult<T> = Result<T, NatError>;

pub(crate) fn parse_err<S: Into<String>, R: Into<String>>(input: S, reason: R) -> NatError {
    NatError::Parse { input: input.into(), reason: reason.into() }
}
