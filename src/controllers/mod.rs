pub mod seats;
pub mod sections;
pub mod selection;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use validator::ValidationErrors;

use crate::seating::SelectionError;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(sections::routes())
        .merge(selection::routes())
}

/// Ошибка обработчика, превращаемая в JSON-ответ.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("seat {0} is not on the seat map")]
    UnknownSeat(String),
    #[error("selection has {len} seats, at most {max} are allowed")]
    SelectionTooLarge { len: usize, max: usize },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    place_id: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::SelectionTooLarge { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnknownSeat(_) | ApiError::Selection(SelectionError::UnknownSeat(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Selection(_) => StatusCode::CONFLICT,
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, place_id) = match self {
            ApiError::Selection(err) => (err.code(), err.place_id().map(str::to_string)),
            ApiError::Validation(_) => ("invalid_request", None),
            ApiError::UnknownSeat(id) => ("unknown_seat", Some(id.clone())),
            ApiError::SelectionTooLarge { .. } => ("selection_too_large", None),
        };
        ErrorBody { error, message: self.to_string(), place_id }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "request rejected");
        (status, Json(self.body())).into_response()
    }
}
