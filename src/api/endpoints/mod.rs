//! Request handlers, one module per route.

pub mod box_label;
pub mod prescription;
pub mod status;

use axum::extract::Multipart;

use crate::api::error::ApiError;

/// Pull the `image` field bytes out of a multipart upload.
///
/// Anything other than a well-formed multipart body with an `image` field
/// — including a request that is not multipart at all — is the same
/// client error.
pub(crate) async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidImage(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::MissingImage)
}
