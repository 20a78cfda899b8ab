use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use workday_engine::{
    CivilZone, HolidayOracle, HolidaySource, RemoteHolidaySource, StaticHolidaySource,
    WorkdayCalculator, WorkdayError, WorkdayQuery, WorkdayResponse, WorkdayService,
    DEFAULT_HOLIDAYS_URL, DEFAULT_TIMEZONE,
};

/// Add working days and/or working hours to a UTC timestamp.
///
/// Weekends, the 12:00-13:00 lunch break and holidays are skipped. Prints the
/// result as JSON: {"date": "2025-08-21T15:00:00Z"}.
#[derive(Parser, Debug)]
#[command(name = "workdays", version, about)]
struct Cli {
    /// Number of working days to add
    #[arg(long, allow_hyphen_values = true)]
    days: Option<String>,

    /// Number of working hours to add
    #[arg(long, allow_hyphen_values = true)]
    hours: Option<String>,

    /// Start instant, ISO 8601 UTC with a Z suffix (default: now)
    #[arg(long)]
    date: Option<String>,

    /// IANA timezone used for calendar reasoning
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// JSON feed of holiday dates
    #[arg(long, default_value = DEFAULT_HOLIDAYS_URL)]
    holidays_url: String,

    /// Skip the holiday feed and use the built-in list
    #[arg(long)]
    offline: bool,

    /// Holiday feed timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(response) => {
            println!("{}", json!({ "date": response.date }));
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn run(cli: &Cli) -> anyhow::Result<WorkdayResponse> {
    let zone: CivilZone = cli.timezone.parse()?;

    let source: Box<dyn HolidaySource> = if cli.offline {
        Box::new(StaticHolidaySource::fallback())
    } else {
        Box::new(RemoteHolidaySource::new(
            cli.holidays_url.clone(),
            Duration::from_secs(cli.timeout_secs),
        ))
    };

    let oracle = Arc::new(HolidayOracle::new());
    oracle.initialize(source.as_ref());

    let service = WorkdayService::new(zone, WorkdayCalculator::with_holidays(oracle));
    let query = WorkdayQuery {
        days: cli.days.clone(),
        hours: cli.hours.clone(),
        date: cli.date.clone(),
    };

    let response = service
        .handle(&query, Utc::now())
        .context("working time calculation failed")?;
    Ok(response)
}

/// Print the error as JSON on stdout and pick the exit code.
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<WorkdayError>() {
        Some(engine_err) => {
            tracing::debug!(error = ?err, "Calculation failed");
            println!(
                "{}",
                json!({ "error": engine_err.kind().as_str(), "message": engine_err.message() })
            );
            if engine_err.kind().is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
        None => {
            println!(
                "{}",
                json!({ "error": "InternalError", "message": err.to_string() })
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("workdays=debug,workday_engine=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
