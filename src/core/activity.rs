//! Bounded, most-recent-first activity feed

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Write;

/// How many entries the feed keeps
pub const ACTIVITY_LOG_CAPACITY: usize = 20;

/// Timestamp layout used when none is configured or the configured one is invalid
pub const DEFAULT_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Whether `format` is a `chrono` strftime string without unknown specifiers
#[must_use]
pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// One recorded mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    /// Human-readable description
    pub message: String,
    /// When it happened
    pub timestamp: DateTime<Local>,
}

impl Activity {
    /// Timestamp rendered with a `chrono` format string
    ///
    /// An invalid format renders with [`DEFAULT_TIME_FORMAT`] instead.
    #[must_use]
    pub fn formatted_time(&self, format: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.timestamp.format(format)).is_ok() {
            return out;
        }
        self.timestamp.format(DEFAULT_TIME_FORMAT).to_string()
    }
}

/// Activity feed. New entries go to the front; the oldest is evicted past capacity.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Create an empty feed
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_LOG_CAPACITY + 1),
        }
    }

    /// Record a message stamped with the current local time
    pub fn record(&mut self, message: impl Into<String>) {
        self.record_at(message, Local::now());
    }

    /// Record a message with an explicit timestamp
    pub fn record_at(&mut self, message: impl Into<String>, timestamp: DateTime<Local>) {
        self.entries.push_front(Activity {
            message: message.into(),
            timestamp,
        });
        self.entries.truncate(ACTIVITY_LOG_CAPACITY);
    }

    /// Entries, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.entries.iter()
    }

    /// Most recent entry
    #[must_use]
    pub fn latest(&self) -> Option<&Activity> {
        self.entries.front()
    }

    /// Number of entries held
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
