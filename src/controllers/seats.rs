use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::models::Seat;
use crate::seating::SeatMap;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats/adjacency", post(check_adjacency))
}

// POST /api/seats/adjacency
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyRequest {
    #[validate(length(min = 1, message = "seat map must not be empty"))]
    pub seats: Vec<Seat>,
    #[validate(length(min = 1))]
    pub first: String,
    #[validate(length(min = 1))]
    pub second: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyResponse {
    pub physical: bool,
    pub considering_status: bool,
}

async fn check_adjacency(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdjacencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let map = SeatMap::new(req.seats);
    let first = map.get(&req.first).ok_or_else(|| ApiError::UnknownSeat(req.first.clone()))?;
    let second = map.get(&req.second).ok_or_else(|| ApiError::UnknownSeat(req.second.clone()))?;

    let response = AdjacencyResponse {
        physical: state.engine.is_physically_adjacent(first, second),
        considering_status: state.engine.is_adjacent_considering_status(first, second, map.seats()),
    };
    Ok((StatusCode::OK, Json(response)))
}
