use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::models::{Point, Section};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sections/locate", post(locate_section))
}

// POST /api/sections/locate
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocateRequest {
    #[validate(length(min = 1, message = "section list must not be empty"))]
    pub sections: Vec<Section>,
    pub point: Point,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResponse {
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Serialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

async fn locate_section(Json(req): Json<LocateRequest>) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let found = Section::locate(&req.sections, req.point);
    let response = LocateResponse {
        section: found.map(|section| section.id.clone()),
        bounds: found
            .and_then(|section| section.geometry.bounds())
            .map(|(min, max)| Bounds { min, max }),
    };
    Ok((StatusCode::OK, Json(response)))
}
