// License: MIT

use chrono::{Local, NaiveDate, TimeZone};

/// The open-ended interval between a start and the next stop. Exists only
/// while tracking is active; closing it yields the [`WorkInterval`] that
/// gets recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingSession {
    started_at_ms: u64,
}

impl TrackingSession {
    pub fn open(now_ms: u64) -> Self {
        Self {
            started_at_ms: now_ms,
        }
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Close the session at `now_ms`. Duration is truncated, not rounded,
    /// to whole seconds; the date is the local calendar day of the end.
    pub fn close(self, now_ms: u64) -> WorkInterval {
        WorkInterval {
            date: local_date_of_ms(now_ms),
            duration_secs: self.elapsed_ms(now_ms) / 1000,
        }
    }
}

/// One completed, recorded tracking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkInterval {
    pub date: NaiveDate,
    pub duration_secs: u64,
}

impl WorkInterval {
    /// The worklog line for this interval, without the trailing newline.
    pub fn log_line(&self) -> String {
        format!("{};{}", self.date.format("%Y-%m-%d"), self.duration_secs)
    }
}

pub(crate) fn local_date_of_ms(now_ms: u64) -> NaiveDate {
    Local
        .timestamp_millis_opt(now_ms as i64)
        .earliest()
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}
