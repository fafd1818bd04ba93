//! Liveness route.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// `GET /` — service liveness message.
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "MedShare API is live",
    })
}
