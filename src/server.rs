use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::StorePaths;
use crate::hashtag;
use crate::models::{CompletionRequest, ProviderDescriptor, Settings};
use crate::providers::{registry, DiscoveryParams, Dispatcher};
use crate::store::{HistoryStore, SettingsStore};

/// Shared state behind the HTTP surface
#[derive(Clone)]
pub struct AppState {
    settings_store: SettingsStore,
    history_store: HistoryStore,
    dispatcher: Arc<Dispatcher>,
    http: reqwest::Client,
}

impl AppState {
    /// Build state over the given storage paths, creating the data
    /// directory if needed
    pub fn new(paths: &StorePaths) -> Result<Self> {
        paths.ensure_dir()?;
        Ok(Self {
            settings_store: SettingsStore::new(paths.settings_path()),
            history_store: HistoryStore::new(paths.history_path()),
            dispatcher: Arc::new(Dispatcher::new()),
            http: reqwest::Client::new(),
        })
    }
}

/// Error response: JSON `{error}` with the given status
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("internal error: {err:#}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Build the API router over the given state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/hashtag", post(generate_hashtag))
        .route("/api/history", get(get_history))
        .route("/api/settings", get(get_settings).post(update_settings))
        .route("/api/providers", get(get_providers))
        .route("/api/models", get(get_models))
        .route("/api/ai", post(run_completion))
        .with_state(state)
}

/// Bind and serve the API until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[derive(Deserialize)]
struct HashtagRequest {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct HashtagResponse {
    hashtag: String,
}

async fn generate_hashtag(
    State(state): State<AppState>,
    Json(req): Json<HashtagRequest>,
) -> Result<Json<HashtagResponse>, ApiError> {
    let settings = state.settings_store.load()?.into_value();
    let hashtag = hashtag::generate(&req.text, &settings);

    if !hashtag.is_empty() {
        let mut history = state.history_store.load()?.into_value();
        if history.record(&hashtag, settings.history_max_items) {
            state.history_store.save(&history)?;
        }
    }

    Ok(Json(HashtagResponse { hashtag }))
}

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<String>,
}

async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.history_store.load()?.into_value();
    Ok(Json(HistoryResponse {
        history: history.entries().to_vec(),
    }))
}

async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    Ok(Json(state.settings_store.load()?.into_value()))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.settings_store.save(&settings)?;
    Ok(Json(json!({ "status": "ok" })))
}

#[derive(Serialize)]
struct ProvidersResponse {
    providers: Vec<ProviderDescriptor>,
}

async fn get_providers() -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: registry::catalog(),
    })
}

#[derive(Deserialize)]
struct ModelsQuery {
    #[serde(default)]
    provider: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

#[derive(Serialize)]
struct ModelsResponse {
    models: Vec<String>,
}

async fn get_models(
    State(state): State<AppState>,
    Query(query): Query<ModelsQuery>,
) -> Json<ModelsResponse> {
    let params = DiscoveryParams {
        api_key: query.api_key,
        base_url: query.base_url,
    };
    let models = registry::list_models(&state.http, &query.provider, &params).await;
    Json(ModelsResponse { models })
}

#[derive(Serialize)]
struct CompletionResponse {
    result: String,
}

async fn run_completion(
    State(state): State<AppState>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    match state.dispatcher.complete(&state.http, &request).await {
        Ok(result) => Ok(Json(CompletionResponse { result })),
        Err(err) => {
            tracing::warn!(
                provider = %request.provider,
                kind = err.kind(),
                "completion failed: {err}"
            );
            Err(ApiError::bad_request(err.to_string()))
        }
    }
}
