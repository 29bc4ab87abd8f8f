use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to read standard input")]
    Stdin {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

/// Rejections from the line-oriented console front end.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing message after severity {severity:?}")]
    MissingMessage { severity: String },
    #[error("invalid duration {raw:?}: {message}")]
    InvalidDuration { raw: String, message: String },
    #[error("action without a label")]
    EmptyActionLabel,
}
