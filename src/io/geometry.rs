use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::model::{normalize_state, Fips, GeometryRecord};

/// States left off the map: Alaska, Hawaii, Puerto Rico. The map frames the contiguous US.
pub const EXCLUDED_STATES: [&str; 3] = ["02", "15", "72"];

pub const DEFAULT_GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/The-Python-Graph-Gallery/master/static/data/US-counties.geojson";

/// Where the county boundary collection comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometrySource {
    Url { url: String, timeout: Duration },
    Path(PathBuf),
}

impl GeometrySource {
    /// `http(s)://` locations are fetched, anything else is read from disk.
    pub fn parse(location: &str, timeout: Duration) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            GeometrySource::Url {
                url: location.to_string(),
                timeout,
            }
        } else {
            GeometrySource::Path(PathBuf::from(location))
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    properties: Option<Properties>,
    #[serde(default)]
    geometry: Value,
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(rename = "STATE", default)]
    state: Value,
}

pub fn load_geometry(source: &GeometrySource) -> Result<Vec<GeometryRecord>, FetchError> {
    let body = match source {
        GeometrySource::Url { url, timeout } => fetch_text(url, *timeout)?,
        GeometrySource::Path(path) => std::fs::read_to_string(path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?,
    };
    let records = parse_geometry(&body)?;
    tracing::info!(features = records.len(), "loaded county boundaries");
    Ok(records)
}

fn fetch_text(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let http = |source: reqwest::Error| FetchError::Http {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .gzip(true)
        .build()
        .map_err(http)?;
    let resp = client.get(url).send().map_err(http)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    resp.text().map_err(http)
}

/// Decode a GeoJSON feature collection into normalized, filtered records.
///
/// Feature ids and `STATE` may be strings or integers. Features whose id is
/// not a county code are dropped, as are features in [`EXCLUDED_STATES`].
pub fn parse_geometry(body: &str) -> Result<Vec<GeometryRecord>, FetchError> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let mut out = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let Some(fips) = scalar_text(&feature.id).as_deref().and_then(Fips::normalize) else {
            tracing::debug!(id = %feature.id, "skipping feature without county id");
            continue;
        };
        let state_code = feature
            .properties
            .as_ref()
            .and_then(|p| scalar_text(&p.state))
            .map(|s| normalize_state(&s))
            .unwrap_or_default();
        if EXCLUDED_STATES.contains(&state_code.as_str()) {
            continue;
        }
        out.push(GeometryRecord {
            fips,
            state_code,
            boundary: feature.geometry,
        });
    }
    Ok(out)
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
