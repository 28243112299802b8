use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use nus_timetable_core::{
    Error,
    catalog::ModuleCatalog,
    timetable::{Timetable, TimetableAssembler, TimetableRequest},
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ModuleCatalog>,
    pub assembler: TimetableAssembler,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Structured error payload returned on every failure path
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

pub fn create_app(catalog: Arc<ModuleCatalog>) -> Router {
    let assembler = TimetableAssembler::new(Arc::clone(&catalog));
    let state = AppState { catalog, assembler };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/modules", get(get_module_list_handler))
        .route("/modules/{code}", get(get_module_detail_handler))
        .route("/generate-timetable", post(generate_timetable_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Service info at the root path
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "NUS Timetable Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Module catalog cache and timetable generation over the NUSMods API",
        "endpoints": {
            "health": "/health",
            "modules": "/modules",
            "module_detail": "/modules/{code}",
            "generate_timetable": "/generate-timetable"
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full module list, served from cache after the first successful fetch
async fn get_module_list_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let list = state.catalog.get_module_list().await?;
    Ok(Json((*list).clone()))
}

/// Single module detail
async fn get_module_detail_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.catalog.get_module_detail(&code).await?;
    Ok(Json((*detail).clone()))
}

/// Build a timetable from `{"modules": [...], "semester": "..."}`
///
/// Per-module fetch failures are swallowed inside the assembler; the only
/// whole-request failure is a malformed body.
async fn generate_timetable_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimetableRequest>, JsonRejection>,
) -> Result<Json<Timetable>, AppError> {
    let Json(request) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;

    let timetable = state
        .assembler
        .build(&request.modules, &request.semester)
        .await;

    Ok(Json(timetable))
}

/// Application error wrapper mapping core errors onto HTTP statuses
#[derive(Debug)]
struct AppError(Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_kind) = match &self.0 {
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Error::ModuleNotFound(_) => (StatusCode::NOT_FOUND, "module_not_found"),
            Error::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "upstream_unavailable"),
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(ErrorResponse {
            error: error_kind.to_string(),
            message: self.0.to_string(),
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
