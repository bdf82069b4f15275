//! Schedule slot configuration.

use serde::{Deserialize, Serialize};

/// A time of day at which a scheduled post should be attempted.
///
/// The hour is interpreted in the bot's fixed reference timezone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{} ({:02}:00)", label, hour)]
pub struct ScheduleSlot {
    /// Hour of day, 0-23
    pub hour: u32,
    /// Human-readable name used in logs
    pub label: String,
}

impl ScheduleSlot {
    /// Create a new slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use morpheus_core::ScheduleSlot;
    ///
    /// let slot = ScheduleSlot::new(7, "morning");
    /// assert_eq!(slot.to_string(), "morning (07:00)");
    /// ```
    pub fn new(hour: u32, label: impl Into<String>) -> Self {
        Self {
            hour,
            label: label.into(),
        }
    }
}
