//! Working-day and working-hour predicates.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::holidays::HolidayOracle;
use crate::schedule::{minute_of_day, WorkSchedule};

/// A [`WorkSchedule`] combined with a [`HolidayOracle`].
///
/// Cheap to clone; the oracle is shared.
#[derive(Debug, Clone)]
pub struct WorkingCalendar {
    schedule: WorkSchedule,
    holidays: Arc<HolidayOracle>,
}

impl WorkingCalendar {
    pub fn new(schedule: WorkSchedule, holidays: Arc<HolidayOracle>) -> Self {
        WorkingCalendar { schedule, holidays }
    }

    /// The standard Monday–Friday schedule over `holidays`.
    pub fn standard(holidays: Arc<HolidayOracle>) -> Self {
        WorkingCalendar::new(WorkSchedule::STANDARD, holidays)
    }

    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    pub fn holidays(&self) -> &HolidayOracle {
        &self.holidays
    }

    /// True iff `date` is a scheduled weekday and not a holiday.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::WorkdayError::Uninitialized`] from the oracle.
    pub fn is_working_date(&self, date: NaiveDate) -> Result<bool> {
        if !self.schedule.is_working_weekday(date.weekday()) {
            return Ok(false);
        }
        Ok(!self.holidays.is_holiday(date)?)
    }

    /// Same as [`WorkingCalendar::is_working_date`] on the instant's date; time-of-day is ignored.
    pub fn is_working_day(&self, instant: NaiveDateTime) -> Result<bool> {
        self.is_working_date(instant.date())
    }

    /// True iff the minute falls in `[day_start, lunch_start)` or `[lunch_end, day_end)`.
    pub fn is_working_hour(&self, time: NaiveTime) -> bool {
        let m = minute_of_day(time);
        let s = &self.schedule;
        (s.day_start_minute() <= m && m < s.lunch_start_minute())
            || (s.lunch_end_minute() <= m && m < s.day_end_minute())
    }

    pub fn is_working_time(&self, instant: NaiveDateTime) -> Result<bool> {
        Ok(self.is_working_day(instant)? && self.is_working_hour(instant.time()))
    }

    pub fn daily_working_minutes(&self) -> u32 {
        self.schedule.daily_working_minutes()
    }
}
