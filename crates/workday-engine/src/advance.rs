//! Advancing an instant by working days and working minutes.
//!
//! All instants are local civil time. Results are truncated to the minute,
//! except for the zero-delta identity cases which return the input untouched.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::calendar::WorkingCalendar;
use crate::error::{Result, WorkdayError};
use crate::normalize::{next_day, snap_backward, snap_forward, MAX_SCAN_DAYS};
use crate::schedule::minute_of_day;

/// Largest day delta accepted (about a century of calendar time).
pub const MAX_WORKING_DAYS: u32 = 36_500;

/// Largest hour delta accepted.
pub const MAX_WORKING_HOURS: u32 = MAX_WORKING_DAYS * 8;

// ── add_working_days ────────────────────────────────────────────────────────

/// Add `days` working days to `base`.
///
/// `base` is first moved with [`snap_backward`], then the date is stepped one
/// calendar day at a time, counting only working days. The time-of-day left by
/// the snap is kept on every step.
///
/// # Errors
///
/// [`WorkdayError::InvalidParameters`] if `days` exceeds [`MAX_WORKING_DAYS`],
/// [`WorkdayError::Uninitialized`] if the holiday oracle is not ready, or
/// [`WorkdayError::Internal`] if the calendar has no working day for
/// [`MAX_SCAN_DAYS`] consecutive days.
pub fn add_working_days(
    calendar: &WorkingCalendar,
    base: NaiveDateTime,
    days: u32,
) -> Result<NaiveDateTime> {
    if days == 0 {
        return Ok(base);
    }
    if days > MAX_WORKING_DAYS {
        return Err(WorkdayError::InvalidParameters(format!(
            "days must be at most {MAX_WORKING_DAYS}, got {days}"
        )));
    }

    let mut current = snap_backward(calendar, base)?;
    tracing::debug!(%base, snapped = %current, days, "Adding working days");

    let mut remaining = days;
    let mut idle_streak = 0u32;
    while remaining > 0 {
        current = next_day(current)?;
        if calendar.is_working_day(current)? {
            remaining -= 1;
            idle_streak = 0;
        } else {
            idle_streak += 1;
            if idle_streak > MAX_SCAN_DAYS {
                return Err(WorkdayError::Internal(format!(
                    "no working day within {MAX_SCAN_DAYS} days after {current}"
                )));
            }
        }
    }

    Ok(current)
}

// ── add_working_minutes / add_working_hours ─────────────────────────────────

/// Add `minutes` working minutes to `base`.
///
/// `base` is first moved with [`snap_forward`]. Each pass consumes the
/// remaining budget up to the next break (`lunch_start` in the morning,
/// `day_end` in the afternoon). When the budget does not fit, the gap is
/// consumed and the instant is snapped forward twice to resume on the far
/// side of the break.
///
/// # Errors
///
/// [`WorkdayError::InvalidParameters`] if `minutes` exceeds
/// [`MAX_WORKING_HOURS`] hours, otherwise the same as [`add_working_days`].
pub fn add_working_minutes(
    calendar: &WorkingCalendar,
    base: NaiveDateTime,
    minutes: u64,
) -> Result<NaiveDateTime> {
    if minutes == 0 {
        return Ok(base);
    }
    if minutes > u64::from(MAX_WORKING_HOURS) * 60 {
        return Err(WorkdayError::InvalidParameters(format!(
            "hours must be at most {MAX_WORKING_HOURS}, got {} minutes",
            minutes
        )));
    }

    let schedule = calendar.schedule();
    let mut current = snap_forward(calendar, base)?;
    tracing::debug!(%base, snapped = %current, minutes, "Adding working minutes");

    let mut remaining = minutes;
    while remaining > 0 {
        if !calendar.is_working_time(current)? {
            current = snap_forward(calendar, current)?;
            continue;
        }

        let now = minute_of_day(current.time());
        let boundary = if current.hour() < schedule.lunch_start() {
            schedule.lunch_start_minute()
        } else {
            schedule.day_end_minute()
        };
        let until_break = u64::from(boundary.saturating_sub(now));

        if remaining <= until_break {
            current = add_minutes(current, remaining)?;
            remaining = 0;
        } else {
            remaining -= until_break;
            current = add_minutes(current, until_break)?;
            // From exactly a boundary the first snap may land on the same
            // instant or on the lunch end; the second settles it.
            current = snap_forward(calendar, current)?;
            current = snap_forward(calendar, current)?;
        }
    }

    Ok(current)
}

/// Add `hours` working hours to `base`. See [`add_working_minutes`].
pub fn add_working_hours(
    calendar: &WorkingCalendar,
    base: NaiveDateTime,
    hours: u32,
) -> Result<NaiveDateTime> {
    add_working_minutes(calendar, base, u64::from(hours) * 60)
}

// ── add_working_days_and_hours ──────────────────────────────────────────────

/// Add `days` working days, then `hours` working hours to the result.
pub fn add_working_days_and_hours(
    calendar: &WorkingCalendar,
    base: NaiveDateTime,
    days: u32,
    hours: u32,
) -> Result<NaiveDateTime> {
    let after_days = add_working_days(calendar, base, days)?;
    add_working_hours(calendar, after_days, hours)
}

fn add_minutes(instant: NaiveDateTime, minutes: u64) -> Result<NaiveDateTime> {
    i64::try_from(minutes)
        .ok()
        .and_then(TimeDelta::try_minutes)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or_else(|| {
            WorkdayError::Internal(format!("cannot add {minutes} minutes to {instant}"))
        })
}
