//! Time-of-day slot selection for scheduled posts.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};
use morpheus_core::ScheduleSlot;
use morpheus_error::ConfigError;
use std::collections::HashSet;

/// Decides which scheduled slot, if any, is due.
///
/// A slot is due during the first `window_minutes` of its hour in the
/// reference timezone, once per calendar hour.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use morpheus_bot::SchedulePlanner;
/// use morpheus_core::ScheduleSlot;
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// let mut planner = SchedulePlanner::new(vec![ScheduleSlot::new(7, "morning")], utc, 5).unwrap();
///
/// let now = Utc.with_ymd_and_hms(2026, 10, 18, 7, 3, 0).unwrap();
/// assert_eq!(planner.due_slot(now).map(|s| s.hour), Some(7));
///
/// planner.record_fired(now);
/// assert!(planner.due_slot(now).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SchedulePlanner {
    slots: Vec<ScheduleSlot>,
    offset: FixedOffset,
    window_minutes: u32,
    last_fired: Option<(NaiveDate, u32)>,
}

impl SchedulePlanner {
    /// Creates a planner.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a slot hour is outside 0-23, two slots
    /// share an hour, or the window is not between 1 and 60 minutes.
    pub fn new(
        slots: Vec<ScheduleSlot>,
        offset: FixedOffset,
        window_minutes: u32,
    ) -> Result<Self, ConfigError> {
        validate_slots(&slots)?;
        if !(1..=60).contains(&window_minutes) {
            return Err(ConfigError::new(format!(
                "Schedule window must be 1-60 minutes, got {}",
                window_minutes
            )));
        }

        Ok(Self {
            slots,
            offset,
            window_minutes,
            last_fired: None,
        })
    }

    /// Slot due at `now`, unless it already fired this calendar hour.
    pub fn due_slot(&self, now: DateTime<Utc>) -> Option<&ScheduleSlot> {
        let local = now.with_timezone(&self.offset);
        if local.minute() >= self.window_minutes {
            return None;
        }
        if self.last_fired == Some(calendar_hour(&local)) {
            return None;
        }
        self.slots.iter().find(|slot| slot.hour == local.hour())
    }

    /// Records a successful post for the calendar hour containing `now`.
    pub fn record_fired(&mut self, now: DateTime<Utc>) {
        self.last_fired = Some(calendar_hour(&now.with_timezone(&self.offset)));
    }

    /// Hour of day of the last firing, in the reference timezone.
    pub fn last_fired_hour(&self) -> Option<u32> {
        self.last_fired.map(|(_, hour)| hour)
    }

    /// Configured slots.
    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    /// Reference timezone.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

fn calendar_hour(local: &DateTime<FixedOffset>) -> (NaiveDate, u32) {
    (local.date_naive(), local.hour())
}

pub(crate) fn validate_slots(slots: &[ScheduleSlot]) -> Result<(), ConfigError> {
    let mut hours = HashSet::new();
    for slot in slots {
        if slot.hour > 23 {
            return Err(ConfigError::new(format!(
                "Slot '{}' has hour {}, expected 0-23",
                slot.label, slot.hour
            )));
        }
        if !hours.insert(slot.hour) {
            return Err(ConfigError::new(format!(
                "Slot '{}' repeats hour {}",
                slot.label, slot.hour
            )));
        }
    }
    Ok(())
}
