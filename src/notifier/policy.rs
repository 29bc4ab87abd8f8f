use std::time::Duration;

use crate::types::{NotificationRequest, Severity};

pub const DEFAULT_SOFT_TIMEOUT: Duration = Duration::from_millis(2_000);
pub const DEFAULT_HARD_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Timing knobs of the display scheduler.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimingPolicy {
    /// Auto-dismiss delay for soft severities (success, info).
    pub soft_timeout: Duration,
    /// Auto-dismiss delay for everything else.
    pub hard_timeout: Duration,
    /// Pause between closing one notification and showing the next.
    pub settle_delay: Duration,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            soft_timeout: DEFAULT_SOFT_TIMEOUT,
            hard_timeout: DEFAULT_HARD_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl TimingPolicy {
    /// `None` means the notification stays until closed manually.
    #[must_use]
    pub fn effective_timeout(&self, request: &NotificationRequest) -> Option<Duration> {
        let timeout = request.duration.unwrap_or_else(|| {
            if request.severity.is_soft() {
                self.soft_timeout
            } else {
                self.hard_timeout
            }
        });
        (!timeout.is_zero()).then_some(timeout)
    }
}

/// Whether the presentation layer should offer a close control.
#[must_use]
pub const fn is_closable(severity: &Severity) -> bool {
    !severity.is_soft()
}
