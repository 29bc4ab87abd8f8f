use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::notifier::TimingPolicy;

use super::defaults::{default_hard_timeout, default_settle_delay, default_soft_timeout};
use super::env::{env_bool, env_duration, env_string};
use super::{Config, HumantimeDuration, LogSettings, MAX_DELAY};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    let builder = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("SNACKBAR")
                .separator("__")
                .try_parsing(true),
        );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) timing: RawTiming,
    #[serde(default)]
    pub(super) log: RawLog,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawTiming {
    #[serde(default = "default_soft_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) soft_timeout: Duration,
    #[serde(default = "default_hard_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) hard_timeout: Duration,
    #[serde(default = "default_settle_delay")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) settle_delay: Duration,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawLog {
    #[serde(default)]
    pub(super) filter: Option<String>,
    #[serde(default)]
    pub(super) json: bool,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(timeout) = env_duration("SNACKBAR_SOFT_TIMEOUT")? {
            self.timing.soft_timeout = timeout;
        }
        if let Some(timeout) = env_duration("SNACKBAR_HARD_TIMEOUT")? {
            self.timing.hard_timeout = timeout;
        }
        if let Some(delay) = env_duration("SNACKBAR_SETTLE_DELAY")? {
            self.timing.settle_delay = delay;
        }
        if let Some(filter) = env_string("SNACKBAR_LOG")? {
            self.log.filter = Some(filter);
        }
        if let Some(json) = env_bool("SNACKBAR_LOG_JSON")? {
            self.log.json = json;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let RawTiming {
            soft_timeout,
            hard_timeout,
            settle_delay,
        } = self.timing;

        check_delay("timing.soft_timeout", soft_timeout)?;
        check_delay("timing.hard_timeout", hard_timeout)?;
        check_delay("timing.settle_delay", settle_delay)?;
        if soft_timeout > hard_timeout {
            return Err(ConfigError::InvalidField {
                field: "timing.soft_timeout",
                message: format!(
                    "soft timeout ({}) must not exceed hard timeout ({})",
                    humantime::format_duration(soft_timeout),
                    humantime::format_duration(hard_timeout)
                ),
            }
            .into());
        }

        let filter = self.log.filter.filter(|f| !f.trim().is_empty());

        Ok(Config {
            timing: TimingPolicy {
                soft_timeout,
                hard_timeout,
                settle_delay,
            },
            log: LogSettings {
                filter,
                json: self.log.json,
            },
        })
    }
}

fn check_delay(field: &'static str, value: Duration) -> std::result::Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::InvalidField {
            field,
            message: "duration must be greater than zero".to_string(),
        });
    }
    if value > MAX_DELAY {
        return Err(ConfigError::InvalidField {
            field,
            message: format!(
                "expected at most {}, got {}",
                humantime::format_duration(MAX_DELAY),
                humantime::format_duration(value)
            ),
        });
    }
    Ok(())
}

impl Default for RawTiming {
    fn default() -> Self {
        Self {
            soft_timeout: default_soft_timeout(),
            hard_timeout: default_hard_timeout(),
            settle_delay: default_settle_delay(),
        }
    }
}
