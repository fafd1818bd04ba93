//! Box route — normalized fields from a medicine-box photo.
//!
//! Unlike the prescription route, the model reply here must parse, each
//! field is normalized, and the medicine name runs through the dictionary
//! corrector. The response duplicates every field under a legacy key for
//! older clients; empty fields are dropped entirely.

use axum::extract::{Multipart, State};
use axum::Json;
use base64::Engine as _;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::endpoints::read_image_field;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::extract::normalize::{clean_date, clean_value};
use crate::extract::parser;
use crate::extract::preprocess;
use crate::extract::prompts::BOX_PROMPT;
use crate::extract::spelling::correct_term;

#[derive(Serialize)]
pub struct BoxResponse {
    pub status: &'static str,
    pub fields: Map<String, Value>,
    pub detections: Map<String, Value>,
}

/// `POST /predict-box` — image upload → normalized label fields.
pub async fn predict(
    State(ctx): State<ApiContext>,
    multipart: Option<Multipart>,
) -> Result<Json<BoxResponse>, ApiError> {
    let Some(mut multipart) = multipart else {
        return Err(ApiError::MissingImage);
    };
    let image = read_image_field(&mut multipart).await?;

    let png = preprocess::prepare_for_model(&image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&png);

    let vision = ctx.core.vision();
    let model = ctx.core.active_model().to_string();
    let raw = tokio::task::spawn_blocking(move || {
        vision.generate_with_image(&model, BOX_PROMPT, &encoded, "image/png")
    })
    .await
    .map_err(|e| ApiError::Upstream(e.to_string()))??;

    let fields = parser::parse_box_fields(&raw)
        .map_err(|e| ApiError::MalformedReply(e.to_string()))?;

    let medicine_name = correct_term(&clean_value(&fields.medicine_name), ctx.core.dictionary());
    let strength = clean_value(&fields.strength);
    let expiry = clean_date(&fields.expiry_date);
    let manufacturing = clean_date(&fields.manufacturing_date);

    let detections = detection_map(&medicine_name, &strength, &expiry, &manufacturing);
    tracing::info!(keys = detections.len(), "Box extraction complete");

    Ok(Json(BoxResponse {
        status: "success",
        fields: detections.clone(),
        detections,
    }))
}

/// Build the response map with both camel-case and legacy duplicate keys,
/// dropping any field whose normalized value is empty.
fn detection_map(
    medicine_name: &str,
    strength: &str,
    expiry: &str,
    manufacturing: &str,
) -> Map<String, Value> {
    let pairs = [
        ("medicineName", medicine_name),
        ("strength", strength),
        ("expiryDate", expiry),
        ("manufacturingDate", manufacturing),
        // Legacy client keys
        ("Medicine_Name", medicine_name),
        ("Strength", strength),
        ("EXP_Date", expiry),
        ("MFG_Date", manufacturing),
    ];

    let mut map = Map::new();
    for (key, value) in pairs {
        if !value.is_empty() {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    map
}
