//! # workday-engine
//!
//! Working-time arithmetic over a business calendar.
//!
//! Given a start instant, a number of working days and/or working hours,
//! the engine produces the resulting instant under a fixed Monday–Friday
//! schedule (08:00–12:00, 13:00–17:00), skipping weekends, the lunch break
//! and a set of holiday dates. All calendar reasoning happens in one civil
//! timezone; the boundary layer converts to and from UTC.
//!
//! ## Modules
//!
//! - [`schedule`]: the weekly work pattern and its hour boundaries
//! - [`holidays`]: holiday sources, fallback list and the [`HolidayOracle`]
//! - [`calendar`]: working-day / working-hour predicates
//! - [`normalize`]: snapping an instant backward or forward onto working time
//! - [`advance`]: adding working days and working minutes
//! - [`calculator`]: the [`WorkdayCalculator`] façade
//! - [`timezone`]: UTC to and from local civil time, UTC string format
//! - [`service`]: request validation and response formatting
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use workday_engine::{HolidayOracle, HolidaySet, WorkdayCalculator};
//! use chrono::NaiveDate;
//!
//! let oracle = Arc::new(HolidayOracle::from_set(HolidaySet::fallback()));
//! let calc = WorkdayCalculator::with_holidays(oracle);
//!
//! // Friday 2025-08-15 17:00 + 1 working hour; Monday the 18th is a holiday.
//! let start = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap().and_hms_opt(17, 0, 0).unwrap();
//! let end = calc.add_working_hours(start, 1).unwrap();
//! assert_eq!(end.to_string(), "2025-08-19 09:00:00");
//! ```

pub mod advance;
pub mod calculator;
pub mod calendar;
pub mod error;
pub mod holidays;
pub mod normalize;
pub mod schedule;
pub mod service;
pub mod timezone;

pub use advance::{
    add_working_days, add_working_days_and_hours, add_working_hours, add_working_minutes,
    MAX_WORKING_DAYS, MAX_WORKING_HOURS,
};
pub use calculator::WorkdayCalculator;
pub use calendar::WorkingCalendar;
pub use error::{ErrorKind, WorkdayError};
pub use holidays::{
    HolidayOracle, HolidaySet, HolidaySource, RemoteHolidaySource, StaticHolidaySource,
    DEFAULT_HOLIDAYS_URL, FALLBACK_HOLIDAYS,
};
pub use normalize::{snap_backward, snap_forward};
pub use schedule::WorkSchedule;
pub use service::{ValidatedParams, WorkdayQuery, WorkdayResponse, WorkdayService};
pub use timezone::{format_utc, parse_utc, CivilZone, DEFAULT_TIMEZONE};
