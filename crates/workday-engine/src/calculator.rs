//! The public calculation façade.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::advance;
use crate::calendar::WorkingCalendar;
use crate::error::Result;
use crate::holidays::HolidayOracle;

/// Entry point for working-time arithmetic.
///
/// Holds only read-only state, so one instance can serve any number of
/// concurrent calculations. Every operation takes a start instant in local
/// civil time and returns a new one.
#[derive(Debug, Clone)]
pub struct WorkdayCalculator {
    calendar: WorkingCalendar,
}

impl WorkdayCalculator {
    pub fn new(calendar: WorkingCalendar) -> Self {
        WorkdayCalculator { calendar }
    }

    /// Standard schedule over the given holiday oracle.
    pub fn with_holidays(holidays: Arc<HolidayOracle>) -> Self {
        WorkdayCalculator::new(WorkingCalendar::standard(holidays))
    }

    pub fn calendar(&self) -> &WorkingCalendar {
        &self.calendar
    }

    pub fn add_working_days(&self, start: NaiveDateTime, days: u32) -> Result<NaiveDateTime> {
        advance::add_working_days(&self.calendar, start, days)
    }

    pub fn add_working_hours(&self, start: NaiveDateTime, hours: u32) -> Result<NaiveDateTime> {
        advance::add_working_hours(&self.calendar, start, hours)
    }

    pub fn add_working_days_and_hours(
        &self,
        start: NaiveDateTime,
        days: u32,
        hours: u32,
    ) -> Result<NaiveDateTime> {
        advance::add_working_days_and_hours(&self.calendar, start, days, hours)
    }
}
