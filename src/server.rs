use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::delimiter::ArrayOptions;
use crate::error::{QueryError, Result};
use crate::settings::Settings;
use crate::value::QueryParams;

/// Settings compiled once at startup and shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub array_options: ArrayOptions,
    pub missing_message: String,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            array_options: settings.array_options()?,
            missing_message: settings.missing_message().to_string(),
        })
    }
}

#[derive(Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub params: QueryParams,
    #[serde(default)]
    pub required: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedParam {
    pub string: Option<String>,
    pub array: Vec<String>,
    pub boolean: bool,
}

#[derive(Serialize, Deserialize)]
pub struct ResolveResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, ResolvedParam>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolves every parameter three ways. Each name in `required` must hold a
/// non-empty string.
pub fn resolve_params(
    params: &QueryParams,
    required: &[String],
    state: &AppState,
) -> Result<BTreeMap<String, ResolvedParam>> {
    for name in required {
        params.require_string(name, Some(state.missing_message.as_str()))?;
    }
    let resolved = params
        .names()
        .map(|name| {
            let param = ResolvedParam {
                string: params.string(name).map(str::to_string),
                array: params.array(name, &state.array_options).into_iter().map(str::to_string).collect(),
                boolean: params.boolean(name),
            };
            (name.to_string(), param)
        })
        .collect();
    Ok(resolved)
}

fn respond(result: Result<BTreeMap<String, ResolvedParam>>) -> (StatusCode, Json<ResolveResponse>) {
    match result {
        Ok(params) => {
            info!(params = params.len(), "resolve complete");
            let body = ResolveResponse { status: "ok".into(), params: Some(params), error: None };
            (StatusCode::OK, Json(body))
        }
        Err(e) => {
            let status = match e {
                QueryError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let msg = format!("{e}");
            warn!(%msg, code = %status.as_u16(), "resolve error");
            let body = ResolveResponse { status: "error".into(), params: None, error: Some(msg) };
            (status, Json(body))
        }
    }
}

async fn resolve_query(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<ResolveResponse>) {
    let params = QueryParams::from_pairs(pairs);
    respond(resolve_params(&params, &[], &state))
}

async fn resolve_body(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> (StatusCode, Json<ResolveResponse>) {
    respond(resolve_params(&req.params, &req.required, &state))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/v1/resolve", get(resolve_query).post(resolve_body))
        .with_state(state)
        .layer(cors)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(settings: &Settings) -> Result<()> {
    let state = Arc::new(AppState::new(settings)?);
    let listener = tokio::net::TcpListener::bind(&settings.server.bind).await?;
    info!(addr = %settings.server.bind, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
