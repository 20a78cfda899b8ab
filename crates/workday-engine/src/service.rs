//! Request boundary: validate raw parameters, convert to local time, run the
//! calculation and format the result back as UTC.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::WorkdayCalculator;
use crate::error::{Result, WorkdayError};
use crate::timezone::{format_utc, parse_utc, CivilZone};

/// Last year that still formats as a four-digit UTC timestamp.
const MAX_RESULT_YEAR: i32 = 9999;

/// Raw request parameters, as they arrive in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkdayQuery {
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Parameters after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedParams {
    pub days: u32,
    pub hours: u32,
    pub start: DateTime<Utc>,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkdayResponse {
    /// Resulting instant, e.g. `2025-08-21T15:00:00Z`.
    pub date: String,
}

impl WorkdayQuery {
    /// Check and convert the raw parameters.
    ///
    /// Empty strings count as missing. At least one of `days`/`hours` must be
    /// present and they may not both be zero. A missing `date` means `now`.
    ///
    /// # Errors
    ///
    /// [`WorkdayError::InvalidParameters`] describing the first problem found.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<ValidatedParams> {
        let days = non_empty(&self.days);
        let hours = non_empty(&self.hours);

        if days.is_none() && hours.is_none() {
            return Err(WorkdayError::InvalidParameters(
                "at least one of 'days' or 'hours' parameters is required".to_string(),
            ));
        }

        let days = days.map(|v| parse_count("days", v)).transpose()?.unwrap_or(0);
        let hours = hours.map(|v| parse_count("hours", v)).transpose()?.unwrap_or(0);

        if days == 0 && hours == 0 {
            return Err(WorkdayError::InvalidParameters(
                "'days' and 'hours' cannot both be zero".to_string(),
            ));
        }

        let start = match non_empty(&self.date) {
            Some(raw) => parse_utc(raw)?,
            None => now,
        };

        Ok(ValidatedParams { days, hours, start })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Plain ASCII digits only; `u32::from_str` alone would also take a leading `+`.
fn parse_count(name: &str, raw: &str) -> Result<u32> {
    let invalid = || {
        WorkdayError::InvalidParameters(format!(
            "parameter '{name}' must be a non-negative integer, got '{raw}'"
        ))
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}

/// Timezone plus calculator: everything needed to answer a request.
#[derive(Debug, Clone)]
pub struct WorkdayService {
    zone: CivilZone,
    calculator: WorkdayCalculator,
}

impl WorkdayService {
    pub fn new(zone: CivilZone, calculator: WorkdayCalculator) -> Self {
        WorkdayService { zone, calculator }
    }

    pub fn zone(&self) -> CivilZone {
        self.zone
    }

    pub fn calculator(&self) -> &WorkdayCalculator {
        &self.calculator
    }

    /// Run the operation matching which deltas are non-zero.
    pub fn calculate(&self, params: &ValidatedParams) -> Result<DateTime<Utc>> {
        let local_start = self.zone.to_local(params.start);
        let local_result = match (params.days, params.hours) {
            (days, hours) if days > 0 && hours > 0 => self
                .calculator
                .add_working_days_and_hours(local_start, days, hours)?,
            (days, 0) => self.calculator.add_working_days(local_start, days)?,
            (_, hours) => self.calculator.add_working_hours(local_start, hours)?,
        };
        let result = self.zone.to_utc(local_result)?;
        if result.year() > MAX_RESULT_YEAR {
            return Err(WorkdayError::InvalidParameters(format!(
                "result falls after year {MAX_RESULT_YEAR}"
            )));
        }
        Ok(result)
    }

    /// Validate `query`, calculate, and format the response.
    ///
    /// `now` is used when the query has no `date`.
    pub fn handle(&self, query: &WorkdayQuery, now: DateTime<Utc>) -> Result<WorkdayResponse> {
        let params = query.validate(now)?;
        let result = self.calculate(&params)?;
        tracing::debug!(
            days = params.days,
            hours = params.hours,
            start = %format_utc(params.start),
            result = %format_utc(result),
            "Calculated working time"
        );
        Ok(WorkdayResponse {
            date: format_utc(result),
        })
    }
}
