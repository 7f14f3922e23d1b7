//! User-facing notification types

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl_wire_enum_conversions!(NotificationLevel {
    Success => "success",
    Info => "info",
    Warning => "warning",
    Error => "error",
});

/// A queued notification waiting to be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// How long the front end should keep it visible
    pub timeout_ms: Option<u64>,
}
