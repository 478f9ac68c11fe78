use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir};

use crate::catalog::{Catalog, CatalogCache};
use crate::indexer::{city_slug, state_path, SearchEntry};
use crate::model::{Episode, NormalizedState};
use crate::search::DEFAULT_LIMIT;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogCache>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    query: String,
    results: Vec<SearchEntry>,
    total: usize,
    time_ms: u128,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    catalog_loaded: bool,
}

#[derive(Debug, Serialize)]
struct StateSummary {
    code: String,
    name: String,
    path: String,
    total_episodes: usize,
    city_count: usize,
}

#[derive(Debug, Serialize)]
struct StateDetail<'a> {
    code: &'a str,
    name: &'a str,
    path: String,
    total_episodes: usize,
    cities: Vec<CityDetail<'a>>,
}

#[derive(Debug, Serialize)]
struct CityDetail<'a> {
    name: &'a str,
    path: String,
    episodes: &'a [Episode],
}

impl StateSummary {
    fn from_state(state: &NormalizedState) -> Self {
        Self {
            code: state.code.clone(),
            name: state.display_name.clone(),
            path: state_path(state),
            total_episodes: state.total_episodes(),
            city_count: state.cities.len(),
        }
    }
}

impl<'a> StateDetail<'a> {
    fn from_state(state: &'a NormalizedState) -> Self {
        let base = state_path(state);
        Self {
            code: &state.code,
            name: &state.display_name,
            path: base.clone(),
            total_episodes: state.total_episodes(),
            cities: state
                .cities
                .iter()
                .map(|city| CityDetail {
                    name: &city.name,
                    path: format!("{}#{}", base, city_slug(&city.name)),
                    episodes: &city.episodes,
                })
                .collect(),
        }
    }
}

pub fn router(state: AppState, output_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/api/states", get(states_handler))
        .route("/api/states/:code", get(state_handler))
        .fallback_service(ServeDir::new(output_dir).append_index_html_on_directories(true))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    catalog: Arc<CatalogCache>,
    output_dir: &std::path::Path,
) -> anyhow::Result<()> {
    let app = router(AppState { catalog }, output_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server listening on http://{}", addr);
    tracing::info!("📁 Serving static files from {}/", output_dir.display());
    tracing::info!("🔍 Search API available at http://{}/api/search?q=<query>", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn load_catalog(state: &AppState) -> Result<Arc<Catalog>, StatusCode> {
    state.catalog.get().await.map_err(|e| {
        tracing::error!("Catalog load error: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_loaded: state.catalog.is_loaded(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, StatusCode> {
    let start = std::time::Instant::now();
    let catalog = load_catalog(&state).await?;

    let results = catalog.search_engine().search(&params.q, params.limit);
    let total = results.len();
    let time_ms = start.elapsed().as_millis();

    tracing::info!(
        "Search query='{}' returned {} results in {}ms",
        params.q,
        total,
        time_ms
    );

    Ok(Json(SearchResponse {
        query: params.q,
        results,
        total,
        time_ms,
    }))
}

async fn states_handler(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let catalog = load_catalog(&state).await?;
    let states: Vec<StateSummary> = catalog.states().iter().map(StateSummary::from_state).collect();
    Ok(Json(states))
}

async fn state_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let catalog = load_catalog(&state).await?;
    let found = catalog.state(&code).ok_or_else(|| {
        tracing::debug!("Unknown state code '{}'", code);
        StatusCode::NOT_FOUND
    })?;
    let body = serde_json::to_value(StateDetail::from_state(found)).map_err(|e| {
        tracing::error!("Failed to serialize state {}: {}", found.code, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(body))
}
