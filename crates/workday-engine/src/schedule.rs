//! The fixed weekly work pattern: which weekdays are worked and the daily
//! hour blocks around the lunch break.

use chrono::{NaiveTime, Timelike, Weekday};
use serde::Serialize;

use crate::error::WorkdayError;

const MINUTES_PER_HOUR: u32 = 60;

/// Weekly schedule with a single lunch break.
///
/// The working day is the union of two half-open blocks:
/// `[day_start, lunch_start)` and `[lunch_end, day_end)`, hours in local civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkSchedule {
    working_weekdays: [Weekday; 5],
    day_start: u32,
    lunch_start: u32,
    lunch_end: u32,
    day_end: u32,
}

impl WorkSchedule {
    /// Monday to Friday, 08:00–12:00 and 13:00–17:00.
    pub const STANDARD: WorkSchedule = WorkSchedule {
        working_weekdays: [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        day_start: 8,
        lunch_start: 12,
        lunch_end: 13,
        day_end: 17,
    };

    /// Build a Monday–Friday schedule with custom hour boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::InvalidParameters`] unless
    /// `day_start < lunch_start < lunch_end < day_end < 24`.
    pub fn new(
        day_start: u32,
        lunch_start: u32,
        lunch_end: u32,
        day_end: u32,
    ) -> Result<Self, WorkdayError> {
        if !(day_start < lunch_start && lunch_start < lunch_end && lunch_end < day_end && day_end < 24)
        {
            return Err(WorkdayError::InvalidParameters(format!(
                "schedule hours must satisfy start < lunch start < lunch end < end < 24, got {day_start}/{lunch_start}/{lunch_end}/{day_end}"
            )));
        }
        Ok(WorkSchedule {
            day_start,
            lunch_start,
            lunch_end,
            day_end,
            ..Self::STANDARD
        })
    }

    pub fn working_weekdays(&self) -> &[Weekday] {
        &self.working_weekdays
    }

    pub fn is_working_weekday(&self, weekday: Weekday) -> bool {
        self.working_weekdays.contains(&weekday)
    }

    pub fn day_start(&self) -> u32 {
        self.day_start
    }

    pub fn lunch_start(&self) -> u32 {
        self.lunch_start
    }

    pub fn lunch_end(&self) -> u32 {
        self.lunch_end
    }

    pub fn day_end(&self) -> u32 {
        self.day_end
    }

    pub fn day_start_minute(&self) -> u32 {
        self.day_start * MINUTES_PER_HOUR
    }

    pub fn lunch_start_minute(&self) -> u32 {
        self.lunch_start * MINUTES_PER_HOUR
    }

    pub fn lunch_end_minute(&self) -> u32 {
        self.lunch_end * MINUTES_PER_HOUR
    }

    pub fn day_end_minute(&self) -> u32 {
        self.day_end * MINUTES_PER_HOUR
    }

    /// Morning block plus afternoon block, in minutes (480 for [`WorkSchedule::STANDARD`]).
    pub fn daily_working_minutes(&self) -> u32 {
        (self.lunch_start - self.day_start + self.day_end - self.lunch_end) * MINUTES_PER_HOUR
    }

    /// True iff the hour falls in the lunch break, compared at hour granularity.
    pub(crate) fn is_lunch_hour(&self, hour: u32) -> bool {
        hour >= self.lunch_start && hour < self.lunch_end
    }

    pub(crate) fn at_hour(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Minutes elapsed since local midnight, ignoring seconds.
pub(crate) fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * MINUTES_PER_HOUR + time.minute()
}
