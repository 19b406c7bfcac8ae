//! # API REST
//!
//! REST API implementation for the ward board.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI documentation
//! - REST-specific concerns (JSON envelopes, status codes, CORS)
//!
//! Uses `ward-core` for the board pipeline and `api-shared` for response types.

#![warn(rust_2018_idioms)]

use api_shared::{BedDetailRes, BedsRes, BoardRes, ErrorRes, HealthRes, HealthService};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use ward_core::board::{
    AgeGroup, BedSlot, BedStatus, Board, BoardSummary, PatientView, RoomView, StationView,
    WaitingEntry, ZoneView,
};
use ward_core::layout::ZoneColor;
use ward_core::{BedId, WaitingReason, WardBoardService};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub board_service: WardBoardService,
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(health, board, beds, bed_detail),
    components(schemas(
        HealthRes,
        BoardRes,
        BedsRes,
        BedDetailRes,
        ErrorRes,
        Board,
        ZoneView,
        ZoneColor,
        RoomView,
        BedSlot,
        BedStatus,
        PatientView,
        AgeGroup,
        StationView,
        WaitingEntry,
        WaitingReason,
        BoardSummary,
    ))
)]
pub struct ApiDoc;

/// Build the board router.
///
/// Routes:
/// - `GET /api/board` - assemble a fresh board
/// - `GET /api/beds` - list valid bed ids
/// - `GET /api/bed-detail/:bedno` - patient recorded against one bed
/// - `GET /api/health` - liveness probe
/// - `GET /api-docs/openapi.json` - OpenAPI document
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/board", get(board))
        .route("/api/beds", get(beds))
        .route("/api/bed-detail/:bedno", get(bed_detail))
        .route("/api/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn internal_error(context: &str, err: &ward_core::WardError) -> ApiError {
    tracing::error!("{context}: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorRes::new("failed to load admission records")),
    )
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness probe; does not touch the admission source.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/board",
    responses(
        (status = 200, description = "Freshly assembled ward board", body = BoardRes),
        (status = 500, description = "Admission source failed", body = ErrorRes)
    )
)]
/// Run one reconciliation cycle and return the board.
///
/// # Errors
/// Returns `500 Internal Server Error` if the admission source fails. No partial board is
/// returned.
#[axum::debug_handler]
async fn board(State(state): State<AppState>) -> Result<Json<BoardRes>, ApiError> {
    match state.board_service.board() {
        Ok(board) => Ok(Json(BoardRes::new(board))),
        Err(e) => Err(internal_error("Board assembly error", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/beds",
    responses(
        (status = 200, description = "Valid bed ids in layout order", body = BedsRes)
    )
)]
#[axum::debug_handler]
async fn beds(State(state): State<AppState>) -> Json<BedsRes> {
    Json(BedsRes::new(
        state.board_service.beds().iter().map(BedId::as_str),
    ))
}

#[utoipa::path(
    get,
    path = "/api/bed-detail/{bedno}",
    params(
        ("bedno" = String, Path, description = "Bed code; normalised before lookup")
    ),
    responses(
        (status = 200, description = "Patient recorded against the bed", body = BedDetailRes),
        (status = 404, description = "No admitted patient on this bed", body = ErrorRes),
        (status = 500, description = "Admission source failed", body = ErrorRes)
    )
)]
/// Look up the admitted patient recorded against a bed.
///
/// # Errors
/// Returns `404 Not Found` if no admission matches the bed, and `500 Internal Server Error` if
/// the admission source fails.
#[axum::debug_handler]
async fn bed_detail(
    State(state): State<AppState>,
    Path(bedno): Path<String>,
) -> Result<Json<BedDetailRes>, ApiError> {
    match state.board_service.bed_detail(&bedno) {
        Ok(Some(patient)) => Ok(Json(BedDetailRes::new(patient))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorRes::new("no admitted patient on this bed")),
        )),
        Err(e) => Err(internal_error("Bed detail error", &e)),
    }
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
