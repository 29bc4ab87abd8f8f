use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Classification of a notification.
///
/// Parsing never fails: labels outside the known set are kept verbatim in
/// [`Severity::Other`] and behave like errors (long timeout, closable).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    #[default]
    Error,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(label) => label.as_str(),
        }
    }

    /// Soft severities auto-dismiss quickly and offer no close control.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        matches!(self, Self::Success | Self::Info)
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(severity) => severity,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw))
    }
}

/// A user-triggerable action attached to a notification.
///
/// The target is opaque here; resolving it is up to whoever renders the slot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Action {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// What a caller submits. Immutable once enqueued.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
    pub actions: Vec<Action>,
    /// Explicit auto-dismiss delay. `Some(Duration::ZERO)` never auto-dismisses.
    pub duration: Option<Duration>,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>, severity: impl Into<Severity>) -> Self {
        Self {
            message: message.into(),
            severity: severity.into(),
            actions: Vec::new(),
            duration: None,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn sticky(self) -> Self {
        self.with_duration(Duration::ZERO)
    }
}

/// Identifier handed out at promotion time, strictly increasing per scheduler.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
