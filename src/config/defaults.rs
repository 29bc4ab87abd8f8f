use std::time::Duration;

use crate::notifier::{DEFAULT_HARD_TIMEOUT, DEFAULT_SETTLE_DELAY, DEFAULT_SOFT_TIMEOUT};

pub(super) const fn default_soft_timeout() -> Duration {
    DEFAULT_SOFT_TIMEOUT
}

pub(super) const fn default_hard_timeout() -> Duration {
    DEFAULT_HARD_TIMEOUT
}

pub(super) const fn default_settle_delay() -> Duration {
    DEFAULT_SETTLE_DELAY
}
