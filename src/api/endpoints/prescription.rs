//! Prescription route — raw medicine list from a handwritten prescription.
//!
//! The term corrector is deliberately bypassed here: clients get the
//! model's reading verbatim, unreadable replies degrade to an empty list.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::Engine as _;
use serde::Serialize;

use crate::api::endpoints::read_image_field;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::extract::parser::{self, Medicine};
use crate::extract::preprocess;
use crate::extract::prompts::PRESCRIPTION_PROMPT;

#[derive(Serialize)]
pub struct PrescriptionResponse {
    pub status: &'static str,
    pub medicines: Vec<Medicine>,
}

/// `POST /predict-prescription` — image upload → medicine/strength pairs.
pub async fn predict(
    State(ctx): State<ApiContext>,
    multipart: Option<Multipart>,
) -> Result<Json<PrescriptionResponse>, ApiError> {
    let Some(mut multipart) = multipart else {
        return Err(ApiError::MissingImage);
    };
    let image = read_image_field(&mut multipart).await?;

    let png = preprocess::prepare_for_model(&image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&png);

    let vision = ctx.core.vision();
    let model = ctx.core.active_model().to_string();
    let raw = tokio::task::spawn_blocking(move || {
        vision.generate_with_image(&model, PRESCRIPTION_PROMPT, &encoded, "image/png")
    })
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))??;

    let medicines = parser::parse_medicines(&raw);
    tracing::info!(count = medicines.len(), "Prescription extraction complete");

    Ok(Json(PrescriptionResponse {
        status: "success",
        medicines,
    }))
}
