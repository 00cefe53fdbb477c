//! User-facing notifications.

use std::fmt;
use std::time::{Duration, Instant};

/// Default time a transient alert stays on screen.
pub const DEFAULT_ALERT_DURATION: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    /// CSS-style name, also used as the terminal prefix.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    /// `None` keeps the alert until the session ends (connectivity warnings).
    pub dismiss_after: Option<Duration>,
}

impl Alert {
    pub fn transient(level: AlertLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            dismiss_after: Some(duration),
        }
    }

    pub fn persistent(level: AlertLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            dismiss_after: None,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.dismiss_after.is_none()
    }
}

/// Alerts currently on screen, dropped once their display time has passed.
#[derive(Debug, Default)]
pub struct AlertBoard {
    entries: Vec<(Alert, Instant)>,
}

impl AlertBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, alert: Alert, now: Instant) {
        self.entries.push((alert, now));
    }

    /// Remove expired alerts and return the ones still visible, oldest first.
    pub fn active(&mut self, now: Instant) -> Vec<&Alert> {
        self.entries.retain(|(alert, posted)| match alert.dismiss_after {
            Some(duration) => now.saturating_duration_since(*posted) < duration,
            None => true,
        });
        self.entries.iter().map(|(alert, _)| alert).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
