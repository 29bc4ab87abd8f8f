use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as SnackbarError;
use crate::notifier::TimingPolicy;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

/// Upper bound for any configured delay; anything longer is a typo.
const MAX_DELAY: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub timing: TimingPolicy,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub filter: Option<String>,
    pub json: bool,
}

impl Config {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be parsed, when an
    /// environment override is malformed, or when the resulting delays fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(SnackbarError::from)?;
        raw.apply_env_overrides().map_err(SnackbarError::from)?;
        raw.validate_and_build()
    }
}
