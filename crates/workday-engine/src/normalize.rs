//! Snapping arbitrary instants onto working instants.
//!
//! - [`snap_backward`]: last working instant at or before the input, keeping the time-of-day
//!   where possible. Used before adding whole working days.
//! - [`snap_forward`]: next working instant at or after the input. Used before, and while,
//!   adding working hours.
//!
//! Both work on local civil time and return instants truncated to the minute.

use chrono::{Days, NaiveDateTime, Timelike};

use crate::calendar::WorkingCalendar;
use crate::error::{Result, WorkdayError};
use crate::schedule::WorkSchedule;

/// Upper bound on consecutive non-working calendar days crossed while searching for a working day.
pub const MAX_SCAN_DAYS: u32 = 3_660;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Move `instant` back to the most recent working instant.
///
/// 1. Step the date back one day at a time until it is a working day (time-of-day unchanged).
/// 2. Before `day_start`: go back one more working day and pin to `day_end:00`.
///    At or after `day_end`: pin to `day_end:00`.
///    Inside lunch: pin to `lunch_start:00`.
///    Otherwise keep the time-of-day.
///
/// # Errors
///
/// [`WorkdayError::Uninitialized`] from the holiday oracle, or
/// [`WorkdayError::Internal`] if no working day lies within [`MAX_SCAN_DAYS`].
pub fn snap_backward(calendar: &WorkingCalendar, instant: NaiveDateTime) -> Result<NaiveDateTime> {
    let schedule = calendar.schedule();
    let (mut current, _) = walk_to_working_day(calendar, instant, Direction::Backward)?;

    let hour = current.hour();
    let minute = current.minute();

    if hour < schedule.day_start() {
        let previous = shift_one_day(current, Direction::Backward)?;
        let (previous, _) = walk_to_working_day(calendar, previous, Direction::Backward)?;
        current = pin_to_hour(previous, schedule.day_end());
    } else if hour >= schedule.day_end() {
        current = pin_to_hour(current, schedule.day_end());
    } else if (hour == schedule.lunch_start() && minute > 0)
        || (hour > schedule.lunch_start() && hour < schedule.lunch_end())
    {
        current = pin_to_hour(current, schedule.lunch_start());
    }

    Ok(truncate_to_minute(current))
}

/// Move `instant` forward to the next working instant.
///
/// 1. Step the date forward until it is a working day.
/// 2. If the date moved, or the hour is before `day_start`: pin to `day_start:00`.
///    Inside lunch: pin to `lunch_end:00`.
///    At or after `day_end`: next working day at `day_start:00`.
///    Otherwise unchanged.
///
/// # Errors
///
/// Same as [`snap_backward`].
pub fn snap_forward(calendar: &WorkingCalendar, instant: NaiveDateTime) -> Result<NaiveDateTime> {
    let schedule = calendar.schedule();
    let (mut current, walked) = walk_to_working_day(calendar, instant, Direction::Forward)?;

    let hour = current.hour();

    if walked > 0 || hour < schedule.day_start() {
        current = pin_to_hour(current, schedule.day_start());
    } else if schedule.is_lunch_hour(hour) {
        current = pin_to_hour(current, schedule.lunch_end());
    } else if hour >= schedule.day_end() {
        let next = shift_one_day(current, Direction::Forward)?;
        let (next, _) = walk_to_working_day(calendar, next, Direction::Forward)?;
        current = pin_to_hour(next, schedule.day_start());
    }

    Ok(truncate_to_minute(current))
}

/// Drop seconds and sub-second components.
pub fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(instant)
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Step one calendar day at a time until the date is a working day.
/// Returns the landed instant and how many days were crossed.
fn walk_to_working_day(
    calendar: &WorkingCalendar,
    instant: NaiveDateTime,
    direction: Direction,
) -> Result<(NaiveDateTime, u32)> {
    let mut current = instant;
    let mut steps = 0u32;
    while !calendar.is_working_day(current)? {
        if steps >= MAX_SCAN_DAYS {
            return Err(WorkdayError::Internal(format!(
                "no working day within {MAX_SCAN_DAYS} days of {instant}"
            )));
        }
        current = shift_one_day(current, direction)?;
        steps += 1;
    }
    Ok((current, steps))
}

fn shift_one_day(instant: NaiveDateTime, direction: Direction) -> Result<NaiveDateTime> {
    let shifted = match direction {
        Direction::Forward => instant.checked_add_days(Days::new(1)),
        Direction::Backward => instant.checked_sub_days(Days::new(1)),
    };
    shifted.ok_or_else(|| WorkdayError::Internal(format!("date out of range stepping from {instant}")))
}

pub(crate) fn next_day(instant: NaiveDateTime) -> Result<NaiveDateTime> {
    shift_one_day(instant, Direction::Forward)
}

fn pin_to_hour(instant: NaiveDateTime, hour: u32) -> NaiveDateTime {
    NaiveDateTime::new(instant.date(), WorkSchedule::at_hour(hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::{HolidayOracle, HolidaySet};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn calendar(holidays: &[&str]) -> WorkingCalendar {
        let set = HolidaySet::parse(holidays).unwrap();
        WorkingCalendar::standard(Arc::new(HolidayOracle::from_set(set)))
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // ── snap_backward ───────────────────────────────────────────────────

    #[test]
    fn test_backward_keeps_working_instant() {
        let cal = calendar(&[]);
        // Wednesday 2025-08-20 10:15
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 10, 15)).unwrap(),
            at(2025, 8, 20, 10, 15)
        );
    }

    #[test]
    fn test_backward_before_start_goes_to_previous_day_end() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 7, 30)).unwrap(),
            at(2025, 8, 19, 17, 0)
        );
    }

    #[test]
    fn test_backward_monday_early_goes_to_friday_end() {
        let cal = calendar(&[]);
        // Monday 2025-08-25 06:00 → Friday 2025-08-22 17:00
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 25, 6, 0)).unwrap(),
            at(2025, 8, 22, 17, 0)
        );
    }

    #[test]
    fn test_backward_after_end_pins_to_end() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 19, 45)).unwrap(),
            at(2025, 8, 20, 17, 0)
        );
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 17, 0)).unwrap(),
            at(2025, 8, 20, 17, 0)
        );
    }

    #[test]
    fn test_backward_lunch_pins_to_lunch_start() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 12, 30)).unwrap(),
            at(2025, 8, 20, 12, 0)
        );
        // Exactly lunch start is left alone.
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 20, 12, 0)).unwrap(),
            at(2025, 8, 20, 12, 0)
        );
    }

    #[test]
    fn test_backward_weekend_keeps_time_on_friday() {
        let cal = calendar(&[]);
        // Saturday 10:00 → Friday 10:00
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 23, 10, 0)).unwrap(),
            at(2025, 8, 22, 10, 0)
        );
        // Sunday 18:00 → Friday 17:00
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 24, 18, 0)).unwrap(),
            at(2025, 8, 22, 17, 0)
        );
    }

    #[test]
    fn test_backward_skips_holiday() {
        let cal = calendar(&["2025-08-18"]);
        // Holiday Monday 18:00 → Friday 17:00
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 18, 18, 0)).unwrap(),
            at(2025, 8, 15, 17, 0)
        );
        // Tuesday 07:00 after a holiday Monday → Friday 17:00
        assert_eq!(
            snap_backward(&cal, at(2025, 8, 19, 7, 0)).unwrap(),
            at(2025, 8, 15, 17, 0)
        );
    }

    #[test]
    fn test_backward_truncates_seconds() {
        let cal = calendar(&[]);
        let input = NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_milli_opt(10, 15, 42, 500)
            .unwrap();
        assert_eq!(snap_backward(&cal, input).unwrap(), at(2025, 8, 20, 10, 15));
    }

    // ── snap_forward ────────────────────────────────────────────────────

    #[test]
    fn test_forward_keeps_working_instant() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 20, 14, 5)).unwrap(),
            at(2025, 8, 20, 14, 5)
        );
    }

    #[test]
    fn test_forward_before_start() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 20, 6, 40)).unwrap(),
            at(2025, 8, 20, 8, 0)
        );
    }

    #[test]
    fn test_forward_lunch_goes_to_lunch_end() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 20, 12, 0)).unwrap(),
            at(2025, 8, 20, 13, 0)
        );
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 20, 12, 59)).unwrap(),
            at(2025, 8, 20, 13, 0)
        );
    }

    #[test]
    fn test_forward_after_end_goes_to_next_day() {
        let cal = calendar(&[]);
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 20, 17, 0)).unwrap(),
            at(2025, 8, 21, 8, 0)
        );
        // Friday evening → Monday morning
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 22, 21, 0)).unwrap(),
            at(2025, 8, 25, 8, 0)
        );
    }

    #[test]
    fn test_forward_weekend_pins_to_start() {
        let cal = calendar(&[]);
        // Saturday afternoon: walking changes the date, so the time resets
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 23, 15, 0)).unwrap(),
            at(2025, 8, 25, 8, 0)
        );
    }

    #[test]
    fn test_forward_skips_holidays() {
        let cal = calendar(&["2025-08-18"]);
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 15, 17, 0)).unwrap(),
            at(2025, 8, 19, 8, 0)
        );
        assert_eq!(
            snap_forward(&cal, at(2025, 8, 17, 14, 0)).unwrap(),
            at(2025, 8, 19, 8, 0)
        );
    }

    #[test]
    fn test_forward_is_idempotent_on_result() {
        let cal = calendar(&[]);
        for input in [
            at(2025, 8, 20, 12, 0),
            at(2025, 8, 20, 17, 0),
            at(2025, 8, 23, 3, 0),
        ] {
            let once = snap_forward(&cal, input).unwrap();
            assert_eq!(snap_forward(&cal, once).unwrap(), once);
        }
    }

    #[test]
    fn test_truncate_to_minute() {
        let input = NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_nano_opt(9, 1, 2, 3)
            .unwrap();
        assert_eq!(truncate_to_minute(input), at(2025, 8, 20, 9, 1));
    }

    #[test]
    fn test_no_working_day_in_range_is_internal_error() {
        // Every weekday of ~11 years declared a holiday.
        let mut dates = Vec::new();
        let mut day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2036, 1, 1).unwrap();
        while day < end {
            dates.push(day);
            day = day.succ_opt().unwrap();
        }
        let cal = WorkingCalendar::standard(Arc::new(HolidayOracle::from_set(HolidaySet::new(
            dates,
        ))));
        let err = snap_forward(&cal, at(2025, 1, 1, 9, 0)).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InternalError);
    }
}
