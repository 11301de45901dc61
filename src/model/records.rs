use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fips::Fips;

/// Which county metric a request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gdp,
    Population,
}

impl MetricKind {
    pub fn display_name(self) -> &'static str {
        match self {
            MetricKind::Gdp => "GDP",
            MetricKind::Population => "Population",
        }
    }

    /// Legend / colour bar label. Units live here, never inside formatted values.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Gdp => "GDP ($)",
            MetricKind::Population => "Population",
        }
    }

    /// Canonical metric column name, e.g. `gdp_2023`.
    pub fn column(self, year: i32) -> String {
        match self {
            MetricKind::Gdp => format!("gdp_{}", year),
            MetricKind::Population => format!("population_{}", year),
        }
    }

    pub fn default_file_name(self, year: i32) -> String {
        match self {
            MetricKind::Gdp => format!("county_gdp_{}.csv", year),
            MetricKind::Population => format!("county_population_{}.csv", year),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gdp" => Ok(MetricKind::Gdp),
            "population" | "pop" => Ok(MetricKind::Population),
            other => Err(format!("unknown metric '{}' (expected gdp or population)", other)),
        }
    }
}

/// One county row of a metric file, in canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub fips: Fips,
    pub county_name: String,
    /// `None` when the source cell was not numeric.
    pub metric_value: Option<f64>,
}

/// One county boundary feature. `boundary` is the raw GeoJSON geometry object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryRecord {
    pub fips: Fips,
    pub state_code: String,
    pub boundary: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    pub fips: Fips,
    pub county_name: String,
    pub metric_value: Option<f64>,
    pub state_code: String,
    pub boundary: serde_json::Value,
}

/// Display row of the top-N table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub county_name: String,
    pub fips: Fips,
    #[serde(skip)]
    pub value: Option<f64>,
    pub formatted_value: String,
}
