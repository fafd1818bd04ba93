//! Image preparation for vision model input.
//!
//! Phone photos embed rotation in EXIF tag 0x0112 — without correction,
//! portrait photos appear sideways to the vision model. Uploads are
//! decoded, rotated upright, and re-encoded as PNG (lossless, RGB).

use std::io::Cursor;

use image::DynamicImage;

/// Maximum input image size (in bytes) before rejecting.
/// Prevents OOM on corrupt/adversarial files.
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024; // 50 MB

/// Minimum valid image size in bytes (smallest valid PNG is ~67 bytes).
pub const MIN_IMAGE_BYTES: usize = 67;

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("Image too large ({0} bytes)")]
    TooLarge(usize),

    #[error("Input too small to be an image ({0} bytes)")]
    TooSmall(usize),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Validate, decode, fix EXIF orientation, and re-encode as PNG.
pub fn prepare_for_model(image_bytes: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    if image_bytes.len() > MAX_IMAGE_BYTES {
        return Err(PreprocessError::TooLarge(image_bytes.len()));
    }
    if image_bytes.len() < MIN_IMAGE_BYTES {
        return Err(PreprocessError::TooSmall(image_bytes.len()));
    }

    let img = image::load_from_memory(image_bytes)
        .map_err(|e| PreprocessError::Decode(e.to_string()))?;

    let orientation = read_exif_orientation(image_bytes);
    let img = apply_orientation(img, orientation);

    encode_png(&img)
}

/// Read EXIF orientation tag from raw image bytes.
/// Returns 1 (normal) if no EXIF data or tag not present.
pub fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    let reader = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(r) => r,
        Err(_) => return 1,
    };

    reader
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .unwrap_or(1)
}

/// Apply EXIF orientation transform to a `DynamicImage`.
///
/// EXIF orientation values:
/// 1 = Normal, 2 = Mirrored, 3 = 180deg, 4 = Flipped V,
/// 5 = Mirrored + 90deg CW, 6 = 90deg CW, 7 = Mirrored + 270deg CW, 8 = 270deg CW
pub fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        1 => img,
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}
