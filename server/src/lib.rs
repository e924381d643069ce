use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use search_core::{DirCorpus, IndexHandle, IndexStore, ScoredResult, SearchConfig, SearchEngine, SearchError, TraceStep};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<ScoredResult>,
}

#[derive(Serialize)]
pub struct VisualizeResponse {
    pub query: String,
    pub steps: Vec<TraceStep>,
}

#[derive(Serialize)]
pub struct RebuildResponse {
    pub terms: usize,
}

/// Where the server finds its documents and index.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub index_path: String,
    pub data_dir: String,
    pub search: SearchConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine<DirCorpus>>,
    pub admin_token: Option<String>,
}

pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self { Self(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SearchError::IndexNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self.0, "request failed");
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let corpus = DirCorpus::new(&config.data_dir, config.search.extension.clone());
    let handle = IndexHandle::new(IndexStore::new(&config.index_path));
    let engine = SearchEngine::new(handle, corpus, config.search);
    // Build the index at startup if none has been persisted yet
    if let Some(terms) = engine.ensure_index()? {
        tracing::info!(terms, "index built automatically");
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app_state = AppState { engine: Arc::new(engine), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/visualize", get(visualize_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let query = params.q.trim().to_string();
    let results = state.engine.search(&query)?;
    let elapsed = start.elapsed();
    tracing::debug!(%query, hits = results.len(), took_s = elapsed.as_secs_f64(), "search");
    Ok(Json(SearchResponse { query, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results }))
}

pub async fn visualize_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<VisualizeResponse>, ApiError> {
    let steps = state.engine.trace(&params.q)?;
    tracing::debug!(query = %params.q, steps = steps.len(), "visualize");
    Ok(Json(VisualizeResponse { query: params.q, steps }))
}

async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<RebuildResponse>, Response> {
    authorize(&state, &headers).map_err(IntoResponse::into_response)?;
    // Reading the corpus and writing the index block, so keep them off the async workers
    let engine = Arc::clone(&state.engine);
    let terms = tokio::task::spawn_blocking(move || engine.rebuild())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("rebuild task failed: {e}")).into_response())?
        .map_err(|e| ApiError(e).into_response())?;
    Ok(Json(RebuildResponse { terms }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
