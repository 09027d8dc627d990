use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-related errors with structured variants.
///
/// Raised before any search starts: a configuration that fails here could
/// never produce a terminating or meaningful run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Invalid caller-supplied market data.
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("{field} must be positive, got {value}")]
    NonPositivePrice {
        field: &'static str,
        value: Decimal,
    },

    #[error("grade must be positive, got {0}")]
    NonPositiveGrade(u32),

    #[error("{field} is out of the representable price range")]
    OutOfRange { field: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidValue`] with a static reason.
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
