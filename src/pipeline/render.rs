use std::path::PathBuf;
use std::thread;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::RenderError;
use crate::io::geometry::{load_geometry, GeometrySource};
use crate::io::metric_csv::load_metric_csv;
use crate::model::{GeometryRecord, MergedRecord, MetricKind, MetricRecord, RankedRow};
use crate::pipeline::merge::merge;
use crate::pipeline::rank::{top_n, TOP_N};

/// Everything a render pass reads. Passed in per request, never held globally.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub year: i32,
    pub gdp_csv: PathBuf,
    pub population_csv: PathBuf,
    pub geometry: GeometrySource,
}

impl DataSources {
    pub fn metric_path(&self, kind: MetricKind) -> &PathBuf {
        match kind {
            MetricKind::Gdp => &self.gdp_csv,
            MetricKind::Population => &self.population_csv,
        }
    }
}

/// Drawing instructions for the choropleth consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethSpec {
    pub column: String,
    pub label: String,
    pub title: String,
    pub color_scale: &'static str,
    pub hover_name: &'static str,
    pub hover_fields: Vec<HoverField>,
    pub fit_bounds: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverField {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

impl ChoroplethSpec {
    pub fn for_metric(kind: MetricKind, year: i32) -> Self {
        let column = kind.column(year);
        ChoroplethSpec {
            label: kind.label().to_string(),
            title: format!("County-Level {} ({})", kind.display_name(), year),
            color_scale: "Viridis",
            hover_name: "county",
            hover_fields: vec![
                HoverField {
                    field: "fips".to_string(),
                    format: None,
                },
                HoverField {
                    field: column.clone(),
                    format: Some(":,.0f"),
                },
            ],
            fit_bounds: "locations",
            column,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub kind: MetricKind,
    pub year: i32,
    pub choropleth: ChoroplethSpec,
    pub merged: Vec<MergedRecord>,
    pub top: Vec<RankedRow>,
}

impl RenderResult {
    pub fn table_title(&self) -> String {
        format!("Top {} Counties by {} ({})", TOP_N, self.kind.display_name(), self.year)
    }

    /// Merged rows as a GeoJSON FeatureCollection; geometry is passed through untouched.
    pub fn to_feature_collection(&self) -> Value {
        let features: Vec<Value> = self
            .merged
            .iter()
            .map(|r| {
                let mut props = Map::new();
                props.insert("fips".to_string(), json!(r.fips));
                props.insert("county".to_string(), json!(r.county_name));
                props.insert("STATE".to_string(), json!(r.state_code));
                props.insert(self.choropleth.column.clone(), json!(r.metric_value));
                json!({
                    "type": "Feature",
                    "id": r.fips,
                    "properties": props,
                    "geometry": r.boundary,
                })
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features })
    }
}

/// One full load -> merge -> rank pass for a selection.
///
/// The metric file and the boundary collection load on separate threads. A
/// metric load failure wins over a boundary failure so the caller always
/// reports the data problem the user selected.
pub fn render(kind: MetricKind, sources: &DataSources) -> Result<RenderResult, RenderError> {
    let metric_path = sources.metric_path(kind);
    let (metrics, geometries) = thread::scope(|s| {
        let geometry = s.spawn(|| load_geometry(&sources.geometry));
        let metrics = load_metric_csv(kind, sources.year, metric_path);
        (
            metrics,
            geometry.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
        )
    });
    let metrics = metrics.inspect_err(|e| tracing::warn!(metric = %kind, error = %e, "metric load failed"))?;
    let geometries = geometries.inspect_err(|e| tracing::warn!(error = %e, "boundary load failed"))?;
    Ok(assemble(kind, sources.year, &metrics, &geometries))
}

/// Merge and rank already-loaded inputs.
pub fn assemble(
    kind: MetricKind,
    year: i32,
    metrics: &[MetricRecord],
    geometries: &[GeometryRecord],
) -> RenderResult {
    let merged = merge(metrics, geometries);
    let top = top_n(&merged, TOP_N);
    RenderResult {
        kind,
        year,
        choropleth: ChoroplethSpec::for_metric(kind, year),
        merged,
        top,
    }
}
