use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workday_engine::{HolidayOracle, WorkdayCalculator, WorkdayService};
use workday_server::{router, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "workday_server=info,workday_engine=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        time_zone = %config.zone,
        holidays_url = %config.holidays_url,
        offline = config.offline,
        "Loaded configuration from environment/.env"
    );

    // Holidays must be loaded before the first request is served.
    let oracle = Arc::new(HolidayOracle::new());
    let source = config.holiday_source();
    let init_oracle = Arc::clone(&oracle);
    tokio::task::spawn_blocking(move || {
        init_oracle.initialize(source.as_ref());
    })
    .await?;

    let service = Arc::new(WorkdayService::new(
        config.zone,
        WorkdayCalculator::with_holidays(oracle),
    ));
    let app = router(service);

    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
