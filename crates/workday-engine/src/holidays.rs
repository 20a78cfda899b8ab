//! Holiday oracle: the set of non-working calendar dates.
//!
//! The set is loaded once from a [`HolidaySource`]. If the source fails for
//! any reason (network, HTTP status, JSON shape, a malformed date) the
//! built-in [`FALLBACK_HOLIDAYS`] list is used instead, so initialization
//! itself never fails. After that the set is read-only and can be shared
//! freely across threads.

use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{Result, WorkdayError};

/// Feed used by the service when nothing else is configured.
pub const DEFAULT_HOLIDAYS_URL: &str = "https://content.capta.co/Recruitment/WorkingDays.json";

/// Colombian public holidays for 2025.
pub const FALLBACK_HOLIDAYS: [&str; 16] = [
    "2025-01-01",
    "2025-01-06",
    "2025-03-24",
    "2025-04-17",
    "2025-04-18",
    "2025-05-01",
    "2025-06-02",
    "2025-06-23",
    "2025-06-30",
    "2025-08-07",
    "2025-08-18",
    "2025-10-13",
    "2025-11-03",
    "2025-11-17",
    "2025-12-08",
    "2025-12-25",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── HolidaySet ──────────────────────────────────────────────────────────────

/// Immutable set of holiday dates, keyed by local civil calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        HolidaySet {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parse a list of `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`WorkdayError::HolidayFeed`] on the first entry that is not a valid date.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let dates = entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref().trim();
                NaiveDate::parse_from_str(entry, DATE_FORMAT).map_err(|e| {
                    WorkdayError::HolidayFeed(format!("invalid holiday date '{entry}': {e}"))
                })
            })
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(HolidaySet { dates })
    }

    /// The built-in fallback set.
    pub fn fallback() -> Self {
        HolidaySet::new(
            FALLBACK_HOLIDAYS
                .iter()
                .filter_map(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok()),
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

// ── Sources ─────────────────────────────────────────────────────────────────

/// Where holiday dates come from.
pub trait HolidaySource {
    /// Return the raw `YYYY-MM-DD` strings.
    fn fetch(&self) -> Result<Vec<String>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Blocking HTTP feed returning a JSON array of `YYYY-MM-DD` strings.
#[derive(Debug, Clone)]
pub struct RemoteHolidaySource {
    url: String,
    timeout: Duration,
}

impl RemoteHolidaySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        RemoteHolidaySource {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RemoteHolidaySource {
    fn default() -> Self {
        RemoteHolidaySource::new(DEFAULT_HOLIDAYS_URL, Duration::from_secs(10))
    }
}

impl HolidaySource for RemoteHolidaySource {
    fn fetch(&self) -> Result<Vec<String>> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("workday-engine/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                WorkdayError::HolidayFeed(format!("failed to initialize HTTP client: {e}"))
            })?;

        let resp = client
            .get(&self.url)
            .send()
            .map_err(|e| WorkdayError::HolidayFeed(format!("failed to fetch holidays: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(WorkdayError::HolidayFeed(format!(
                "failed to fetch holidays: HTTP {status}"
            )));
        }

        resp.json::<Vec<String>>()
            .map_err(|e| WorkdayError::HolidayFeed(format!("failed to decode holidays: {e}")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidaySource {
    dates: Vec<String>,
}

impl StaticHolidaySource {
    pub fn new<I, S>(dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticHolidaySource {
            dates: dates.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in fallback list, for offline use.
    pub fn fallback() -> Self {
        StaticHolidaySource::new(FALLBACK_HOLIDAYS)
    }
}

impl HolidaySource for StaticHolidaySource {
    fn fetch(&self) -> Result<Vec<String>> {
        Ok(self.dates.clone())
    }

    fn describe(&self) -> String {
        format!("static list ({} dates)", self.dates.len())
    }
}

/// Fetch and parse from `source`, substituting the fallback set on any failure.
pub fn load_or_fallback(source: &dyn HolidaySource) -> HolidaySet {
    match source.fetch().and_then(|entries| HolidaySet::parse(&entries)) {
        Ok(set) => {
            tracing::info!(
                source = %source.describe(),
                count = set.len(),
                "Loaded holiday calendar"
            );
            set
        }
        Err(err) => {
            let set = HolidaySet::fallback();
            tracing::warn!(
                source = %source.describe(),
                error = %err,
                count = set.len(),
                "Holiday feed unavailable, using fallback list"
            );
            set
        }
    }
}

// ── HolidayOracle ───────────────────────────────────────────────────────────

/// Answers "is this date a holiday?" once initialized.
///
/// Construct it empty with [`HolidayOracle::new`] and call
/// [`HolidayOracle::initialize`] once before any calculation, or build a
/// ready one with [`HolidayOracle::from_set`]. Lookups take `&self` and never
/// lock.
#[derive(Debug, Default)]
pub struct HolidayOracle {
    holidays: OnceLock<HolidaySet>,
}

impl HolidayOracle {
    pub fn new() -> Self {
        HolidayOracle::default()
    }

    pub fn from_set(set: HolidaySet) -> Self {
        let oracle = HolidayOracle::new();
        // A fresh cell is always empty.
        let _ = oracle.holidays.set(set);
        oracle
    }

    /// Populate the oracle from `source`. A second call is a no-op and does
    /// not touch the source again.
    pub fn initialize(&self, source: &dyn HolidaySource) -> &HolidaySet {
        self.holidays.get_or_init(|| load_or_fallback(source))
    }

    pub fn is_initialized(&self) -> bool {
        self.holidays.get().is_some()
    }

    /// The loaded snapshot, if any.
    pub fn holidays(&self) -> Option<&HolidaySet> {
        self.holidays.get()
    }

    /// # Errors
    ///
    /// Returns [`WorkdayError::Uninitialized`] if [`HolidayOracle::initialize`]
    /// has not run yet.
    pub fn is_holiday(&self, date: NaiveDate) -> Result<bool> {
        self.holidays
            .get()
            .map(|set| set.contains(date))
            .ok_or_else(|| {
                WorkdayError::Uninitialized(
                    "holiday calendar queried before initialize()".to_string(),
                )
            })
    }
}
