use std::path::PathBuf;
use std::time::Duration;

use crate::io::geometry::{GeometrySource, DEFAULT_GEOJSON_URL};
use crate::model::MetricKind;
use crate::pipeline::DataSources;

pub const DEFAULT_YEAR: i32 = 2023;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const LOG_ENV: &str = "COUNTYMAP_LOG";

/// Runtime settings, resolved from environment variables with fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub year: i32,
    pub gdp_csv: PathBuf,
    pub population_csv: PathBuf,
    pub geojson: String,
    pub fetch_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup. Unparsable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let year = lookup("COUNTYMAP_YEAR")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_YEAR);
        let timeout_secs = lookup("COUNTYMAP_FETCH_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

        AppConfig {
            year,
            gdp_csv: lookup("COUNTYMAP_GDP_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(MetricKind::Gdp.default_file_name(year))),
            population_csv: lookup("COUNTYMAP_POPULATION_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(MetricKind::Population.default_file_name(year))),
            geojson: lookup("COUNTYMAP_GEOJSON").unwrap_or_else(|| DEFAULT_GEOJSON_URL.to_string()),
            fetch_timeout: Duration::from_secs(timeout_secs),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(8000),
        }
    }

    pub fn sources(&self) -> DataSources {
        DataSources {
            year: self.year,
            gdp_csv: self.gdp_csv.clone(),
            population_csv: self.population_csv.clone(),
            geometry: GeometrySource::parse(&self.geojson, self.fetch_timeout),
        }
    }
}

/// Install the `tracing` subscriber; the filter comes from `COUNTYMAP_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg.year, 2023);
        assert_eq!(cfg.gdp_csv, PathBuf::from("county_gdp_2023.csv"));
        assert_eq!(cfg.population_csv, PathBuf::from("county_population_2023.csv"));
        assert_eq!(cfg.geojson, DEFAULT_GEOJSON_URL);
        assert_eq!(cfg.port, 8000);
        assert!(matches!(cfg.sources().geometry, GeometrySource::Url { .. }));
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("COUNTYMAP_YEAR", "2022"),
            ("COUNTYMAP_GEOJSON", "data/counties.geojson"),
            ("COUNTYMAP_FETCH_TIMEOUT_SECS", "soon"),
            ("PORT", "9090"),
        ]);
        let cfg = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.year, 2022);
        assert_eq!(cfg.gdp_csv, PathBuf::from("county_gdp_2022.csv"));
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
        assert_eq!(cfg.port, 9090);
        assert_eq!(
            cfg.sources().geometry,
            GeometrySource::Path(PathBuf::from("data/counties.geojson"))
        );
    }
}
