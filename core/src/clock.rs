//! Day stepping for a single merchant's ongoing activity.

use crate::types::Timestamp;
use chrono::Duration;

/// Yields consecutive days in [first, end). One item = one simulated day.
#[derive(Debug, Clone)]
pub struct DayCursor {
    current: Timestamp,
    end: Timestamp,
}

impl DayCursor {
    /// The days strictly after `anchor`, up to but excluding
    /// `anchor + horizon_days`.
    pub fn after(anchor: Timestamp, horizon_days: u32) -> Self {
        Self {
            current: anchor + Duration::days(1),
            end: anchor + Duration::days(i64::from(horizon_days)),
        }
    }

    pub fn remaining(&self) -> i64 {
        (self.end - self.current).num_days().max(0)
    }
}

impl Iterator for DayCursor {
    type Item = Timestamp;

    fn next(&mut self) -> Option<Timestamp> {
        if self.current >= self.end {
            return None;
        }
        let day = self.current;
        self.current += Duration::days(1);
        Some(day)
    }
}

/// `base` shifted by whole days.
pub fn day_offset(base: Timestamp, days: i64) -> Timestamp {
    base + Duration::days(days)
}
