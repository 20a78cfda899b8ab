use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::anyhow;
use workday_engine::{
    CivilZone, HolidaySource, RemoteHolidaySource, StaticHolidaySource, DEFAULT_HOLIDAYS_URL,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub zone: CivilZone,
    pub holidays_url: String,
    pub fetch_timeout: Duration,
    pub offline: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key/value lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr_raw =
            lookup("WORKDAYS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let mut bind_addr: SocketAddr = bind_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid WORKDAYS_BIND_ADDR value: {}", bind_addr_raw))?;
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| anyhow!("Invalid PORT value: {}", port))?;
            bind_addr.set_port(port);
        }

        let zone_name = lookup("WORKDAYS_TIMEZONE").unwrap_or_else(|| CivilZone::default().to_string());
        let zone: CivilZone = zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid WORKDAYS_TIMEZONE value: {}", zone_name))?;

        let holidays_url =
            lookup("WORKDAYS_HOLIDAYS_URL").unwrap_or_else(|| DEFAULT_HOLIDAYS_URL.to_string());

        let fetch_timeout = lookup("WORKDAYS_FETCH_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let offline = lookup("WORKDAYS_OFFLINE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Config {
            bind_addr,
            zone,
            holidays_url,
            fetch_timeout,
            offline,
        })
    }

    pub fn holiday_source(&self) -> Box<dyn HolidaySource + Send> {
        if self.offline {
            Box::new(StaticHolidaySource::fallback())
        } else {
            Box::new(RemoteHolidaySource::new(
                self.holidays_url.clone(),
                self.fetch_timeout,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.zone.to_string(), "America/Bogota");
        assert_eq!(cfg.holidays_url, DEFAULT_HOLIDAYS_URL);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(10));
        assert!(!cfg.offline);
    }

    #[test]
    fn port_overrides_bind_port() {
        let cfg = config(&[("WORKDAYS_BIND_ADDR", "127.0.0.1:8080"), ("PORT", "4000")]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:4000");
    }

    #[test]
    fn invalid_timezone_is_error() {
        assert!(config(&[("WORKDAYS_TIMEZONE", "Nowhere/City")]).is_err());
    }

    #[test]
    fn offline_flag() {
        assert!(config(&[("WORKDAYS_OFFLINE", "true")]).unwrap().offline);
        assert!(config(&[("WORKDAYS_OFFLINE", "1")]).unwrap().offline);
        assert!(!config(&[("WORKDAYS_OFFLINE", "no")]).unwrap().offline);
    }

    #[test]
    fn offline_source_is_fallback_list() {
        let cfg = config(&[("WORKDAYS_OFFLINE", "true")]).unwrap();
        assert_eq!(cfg.holiday_source().fetch().unwrap().len(), 16);
    }
}
