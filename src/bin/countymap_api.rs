use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use countymap::config::{init_tracing, AppConfig};
use countymap::pipeline::ChoroplethSpec;
use countymap::{render, DataSources, MetricKind, RankedRow, RenderError, RenderResult};

#[derive(Clone)]
struct AppState {
    sources: Arc<DataSources>,
}

#[derive(Debug, Deserialize)]
struct MetricQuery {
    metric: Option<String>,
}

#[derive(Debug, Serialize)]
struct RenderResponse {
    title: String,
    table_title: String,
    choropleth: ChoroplethSpec,
    geojson: serde_json::Value,
    top: Vec<RankedRow>,
}

#[derive(Debug, Serialize)]
struct TopResponse {
    table_title: String,
    label: String,
    top: Vec<RankedRow>,
}

type ApiError = (StatusCode, serde_json::Value);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cfg = AppConfig::from_env();
    let state = AppState {
        sources: Arc::new(cfg.sources()),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/render", get(render_map))
        .route("/top", get(render_top))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid HOST/PORT ({}:{})", cfg.host, cfg.port))?;
    tracing::info!(%addr, year = cfg.year, geojson = %cfg.geojson, "countymap-api listening");

    let listener = tokio::net::TcpListener::bind(addr).await.context("bind failed")?;
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

async fn healthz() -> impl IntoResponse {
    Json(json!({"ok": true}))
}

async fn render_map(State(st): State<AppState>, Query(q): Query<MetricQuery>) -> impl IntoResponse {
    match run_pipeline(&st, q).await {
        Ok(result) => {
            let body = RenderResponse {
                title: result.choropleth.title.clone(),
                table_title: result.table_title(),
                geojson: result.to_feature_collection(),
                choropleth: result.choropleth,
                top: result.top,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err((code, body)) => (code, Json(body)).into_response(),
    }
}

async fn render_top(State(st): State<AppState>, Query(q): Query<MetricQuery>) -> impl IntoResponse {
    match run_pipeline(&st, q).await {
        Ok(result) => {
            let body = TopResponse {
                table_title: result.table_title(),
                label: result.choropleth.label,
                top: result.top,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err((code, body)) => (code, Json(body)).into_response(),
    }
}

/// File reads and the boundary fetch block; run them off the async workers.
async fn run_pipeline(st: &AppState, q: MetricQuery) -> Result<RenderResult, ApiError> {
    let kind: MetricKind = q
        .metric
        .as_deref()
        .unwrap_or("gdp")
        .parse()
        .map_err(|e: String| (StatusCode::BAD_REQUEST, json!({"error": e})))?;

    let sources = Arc::clone(&st.sources);
    let join = tokio::task::spawn_blocking(move || render(kind, &sources));

    match join.await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(error_response(kind, &e)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": format!("join error: {e}")}),
        )),
    }
}

fn error_response(kind: MetricKind, e: &RenderError) -> ApiError {
    let code = match e {
        RenderError::Load(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RenderError::Fetch(_) => StatusCode::BAD_GATEWAY,
    };
    (code, json!({"error": e.user_message(kind)}))
}
