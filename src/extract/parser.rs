//! Model reply parsing: code-fence stripping and JSON payload extraction.
//!
//! The prescription route parses leniently — an unparseable reply is an
//! empty list, and malformed entries are skipped item by item. The box
//! route parses strictly and lets the caller surface the failure.

use serde::{Deserialize, Serialize};

/// One medicine entry from the prescription route. Returned to clients
/// exactly as extracted — no correction, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub strength: String,
}

#[derive(Debug, Deserialize)]
struct PrescriptionPayload {
    #[serde(default)]
    medicines: Vec<serde_json::Value>,
}

/// Raw box-label fields, keys exactly as the prompt demands them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxFields {
    #[serde(default, rename = "medicineName")]
    pub medicine_name: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default, rename = "expiryDate")]
    pub expiry_date: String,
    #[serde(default, rename = "manufacturingDate")]
    pub manufacturing_date: String,
}

/// Remove the Markdown code-fence markers models wrap JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the prescription reply. Unparseable replies yield an empty list;
/// entries that are not medicine objects are skipped.
pub fn parse_medicines(raw: &str) -> Vec<Medicine> {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<PrescriptionPayload>(&cleaned) {
        Ok(payload) => payload
            .medicines
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Prescription reply was not parseable JSON, returning empty list");
            Vec::new()
        }
    }
}

/// Parse the box reply. Strict — the caller maps the error to a response.
pub fn parse_box_fields(raw: &str) -> Result<BoxFields, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned)
}
