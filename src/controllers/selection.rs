//! Предварительная проверка выбора мест перед бронированием.
//!
//! Каждый запрос несёт свежий снимок плана зала и текущий выбор клиента;
//! сервис ничего не хранит между запросами. Окончательное решение о брони
//! всё равно принимает бэкенд бронирования и оплаты.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::models::Seat;
use crate::seating::{SeatEngine, SeatMap, Selection, SelectionError};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/selection/can-add", post(can_add))
        .route("/selection/connected", post(check_connected))
        .route("/selection/select", post(select_seat))
        .route("/selection/deselect", post(deselect_seat))
        .route("/selection/toggle", post(toggle_seat))
        .route("/selection/confirm", post(confirm_selection))
        .route("/selection/stale", post(stale_seats))
}

/* ---------- requests ---------- */

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    #[validate(length(min = 1, message = "seat map must not be empty"))]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CanAddRequest {
    #[validate(length(min = 1, message = "seat map must not be empty"))]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub selection: Selection,
    #[validate(length(min = 1))]
    pub candidate: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeatActionRequest {
    #[validate(length(min = 1, message = "seat map must not be empty"))]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub selection: Selection,
    #[validate(length(min = 1))]
    pub place_id: String,
}

/* ---------- responses ---------- */

#[derive(Debug, Serialize)]
pub struct CanAddResponse {
    pub allowed: bool,
}

#[derive(Debug, Serialize)]
pub struct ConnectedResponse {
    pub connected: bool,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selection: Selection,
}

#[derive(Debug, Serialize)]
pub struct StaleResponse {
    pub stale: Vec<String>,
}

/* ---------- handlers ---------- */

// Выбор длиннее лимита до движка не доходит.
fn check_size(state: &AppState, selection: &Selection) -> Result<(), ApiError> {
    let max = state.engine.config().max_selection;
    if selection.len() > max {
        return Err(ApiError::SelectionTooLarge { len: selection.len(), max });
    }
    Ok(())
}

// POST /api/selection/can-add
async fn can_add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CanAddRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    check_size(&state, &req.selection)?;

    let map = SeatMap::new(req.seats);
    let candidate = map
        .get(&req.candidate)
        .ok_or_else(|| ApiError::UnknownSeat(req.candidate.clone()))?;

    let allowed = state.engine.can_add_seat(candidate, req.selection.ids(), &map);
    Ok((StatusCode::OK, Json(CanAddResponse { allowed })))
}

// POST /api/selection/connected
async fn check_connected(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    check_size(&state, &req.selection)?;

    let map = SeatMap::new(req.seats);
    let connected = state.engine.is_selection_connected(req.selection.ids(), &map);
    Ok((StatusCode::OK, Json(ConnectedResponse { connected })))
}

type SelectionRule = fn(&SeatEngine, &Selection, &str, &SeatMap) -> Result<Selection, SelectionError>;

fn apply_rule(state: &AppState, req: SeatActionRequest, rule: SelectionRule) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    check_size(state, &req.selection)?;

    let map = SeatMap::new(req.seats);
    let selection = rule(&state.engine, &req.selection, &req.place_id, &map)?;
    Ok((StatusCode::OK, Json(SelectionResponse { selection })))
}

// POST /api/selection/select
async fn select_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    apply_rule(&state, req, SeatEngine::select)
}

// POST /api/selection/deselect
async fn deselect_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    apply_rule(&state, req, SeatEngine::deselect)
}

// POST /api/selection/toggle
async fn toggle_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    apply_rule(&state, req, SeatEngine::toggle)
}

// POST /api/selection/confirm
async fn confirm_selection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    check_size(&state, &req.selection)?;

    let map = SeatMap::new(req.seats);
    state.engine.confirm(&req.selection, &map)?;
    tracing::info!(seats = req.selection.len(), "selection confirmed");
    Ok((StatusCode::OK, Json(SelectionResponse { selection: req.selection })))
}

// POST /api/selection/stale
async fn stale_seats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    check_size(&state, &req.selection)?;

    let map = SeatMap::new(req.seats);
    let stale = state.engine.stale_seats(&req.selection, &map);
    if !stale.is_empty() {
        tracing::warn!(stale = ?stale, "selection contains seats that are no longer available");
    }
    Ok((StatusCode::OK, Json(StaleResponse { stale })))
}
