#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod notifier;
pub mod telemetry;
pub mod types;

pub use notifier::{Phase, Scheduler, Snackbar, TimingPolicy, VisibleState};
pub use types::{Action, NotificationId, NotificationRequest, Severity};

pub type Result<T> = std::result::Result<T, error::Error>;
