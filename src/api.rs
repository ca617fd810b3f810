// 🌐 HTTP API - Calculate + save endpoints (axum)
//
//   GET  /                 numerology page
//   GET  /api/health       health check
//   POST /api/calculate    form -> numbers, grid, interpretations
//   POST /saveUser         persist one record (fixed wire contract)

use crate::db::{insert_user, SaveUserRequest, UserRecord};
use crate::interpretations::{interpretation, phase_analysis, PhaseAnalysis};
use crate::numerology::{angel_number, calculate};
use crate::validation::{describe, UserForm};
use crate::{SAVE_FAILURE_MESSAGE, SAVE_SUCCESS_MESSAGE};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{ "message": ... }` body used by the save and calculate endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn message(status: StatusCode, text: impl Into<String>) -> axum::response::Response {
    (status, Json(MessageResponse { message: text.into() })).into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Meanings {
    name_number: &'static str,
    moolank: &'static str,
    bhagyank: &'static str,
}

/// Calculate response: the five numbers flattened, plus the extras
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    name_number: u32,
    dob_number: u32,
    moolank: u32,
    bhagyank: u32,
    destiny: u32,
    name_total: u32,
    angel_number: u32,
    /// Nine display cells, row-major, "-" for empty
    grid: Vec<String>,
    missing_numbers: Vec<u32>,
    meanings: Meanings,
    phases: PhaseAnalysis,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/calculate - Run the numerology engine over one form
async fn calculate_numbers(body: Bytes) -> axum::response::Response {
    let form: UserForm = match serde_json::from_slice(&body) {
        Ok(form) => form,
        Err(e) => return message(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)),
    };

    if let Err(errors) = form.validate() {
        return message(StatusCode::BAD_REQUEST, describe(&errors));
    }

    let input = match form.to_input() {
        Ok(input) => input,
        Err(e) => return message(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let calc = calculate(&input);
    let r = calc.result;

    let response = CalculateResponse {
        name_number: r.name_number,
        dob_number: r.dob_number,
        moolank: r.moolank,
        bhagyank: r.bhagyank,
        destiny: r.destiny,
        name_total: calc.name_total,
        angel_number: angel_number(input.dob.year, form.gender()),
        grid: calc.grid.cells(),
        missing_numbers: calc.grid.missing(),
        meanings: Meanings {
            name_number: interpretation(r.name_number),
            moolank: interpretation(r.moolank),
            bhagyank: interpretation(r.bhagyank),
        },
        phases: phase_analysis(r.moolank, r.bhagyank),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /saveUser - Store one record; any failure is a 500 with a fixed message
async fn save_user(State(state): State<AppState>, body: Bytes) -> axum::response::Response {
    let request: SaveUserRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, "rejecting saveUser body");
            return message(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILURE_MESSAGE);
        }
    };

    let record = UserRecord::new(request);

    let conn = match state.db.lock() {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "database mutex poisoned");
            return message(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILURE_MESSAGE);
        }
    };

    match insert_user(&conn, &record, "web") {
        Ok(()) => {
            info!(user = %record.id, "user saved");
            message(StatusCode::OK, SAVE_SUCCESS_MESSAGE)
        }
        Err(e) => {
            error!(error = ?e, "error saving user");
            message(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILURE_MESSAGE)
        }
    }
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/calculate", post(calculate_numbers));

    Router::new()
        .route("/", get(serve_index))
        .route("/saveUser", post(save_user))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
