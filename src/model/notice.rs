//! Transient banner shown at the bottom of every screen

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Message raised when the periodic health check fails
pub const LOST_CONNECTION_MESSAGE: &str = "Lost connection to server. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    /// Sticky notices stay until dismissed or replaced
    pub sticky: bool,
    pub raised_at: Instant,
    pub timestamp: DateTime<Local>,
}

impl Notice {
    fn new(message: impl Into<String>, severity: Severity, sticky: bool) -> Self {
        Self {
            message: message.into(),
            severity,
            sticky,
            raised_at: Instant::now(),
            timestamp: Local::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info, false)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error, false)
    }

    pub fn lost_connection() -> Self {
        Self::new(LOST_CONNECTION_MESSAGE, Severity::Warning, true)
    }

    pub fn is_lost_connection(&self) -> bool {
        self.message == LOST_CONNECTION_MESSAGE
    }

    pub fn is_expired(&self, now: Instant, timeout: Duration) -> bool {
        !self.sticky && now.saturating_duration_since(self.raised_at) >= timeout
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_notice_expires() {
        let notice = Notice::error("boom");
        let timeout = Duration::from_secs(6);
        assert!(!notice.is_expired(notice.raised_at, timeout));
        assert!(notice.is_expired(notice.raised_at + timeout, timeout));
    }

    #[test]
    fn test_lost_connection_is_sticky() {
        let notice = Notice::lost_connection();
        assert_eq!(notice.severity, Severity::Warning);
        assert!(notice.is_lost_connection());
        assert!(!notice.is_expired(
            notice.raised_at + Duration::from_secs(3600),
            Duration::from_secs(6)
        ));
    }
}
