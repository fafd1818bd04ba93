//! Startup model selection.
//!
//! One-shot at boot, no retry: enumerate the provider's models, take the
//! first generation-capable one whose identifier carries the preferred
//! marker, and fall back to a fixed identifier when enumeration yields
//! nothing usable (or fails outright).

use super::types::VisionClient;

/// Substring that marks the preferred model family.
pub const PREFERRED_MODEL_MARKER: &str = "flash";

/// Used when no preferred model is available or enumeration fails.
///
/// Single source of truth — selection has exactly one fallback path.
pub const DEFAULT_MODEL_FALLBACK: &str = "gemini-1.5-flash";

/// Resolve the model identifier used for every request in this process.
pub fn select_active_model(client: &dyn VisionClient) -> String {
    match client.list_models() {
        Ok(models) => {
            for model in &models {
                if model.supports_generation() && model.name.contains(PREFERRED_MODEL_MARKER) {
                    tracing::info!(model = %model.name, "Selected generative model");
                    return model.name.clone();
                }
            }
            tracing::warn!(
                fallback = DEFAULT_MODEL_FALLBACK,
                "No preferred model among {} available, using fallback",
                models.len()
            );
            DEFAULT_MODEL_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                fallback = DEFAULT_MODEL_FALLBACK,
                "Model enumeration failed, using fallback"
            );
            DEFAULT_MODEL_FALLBACK.to_string()
        }
    }
}
