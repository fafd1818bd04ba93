//! Provider-facing types and error taxonomy.

use serde::Deserialize;

/// Generation method a model must advertise to be usable for extraction.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// Model entry from the provider's model-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Fully-qualified identifier, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    /// Capabilities advertised by the provider (may be absent for some models).
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether this model can serve `generateContent` requests.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_CONTENT_METHOD)
    }
}

/// Abstraction over the generative vision provider.
///
/// Calls are blocking — handlers dispatch them through the runtime's
/// blocking-task facility. A mock implementation backs all handler tests.
pub trait VisionClient: Send + Sync {
    /// Send a prompt plus one inline image, return the generated text.
    fn generate_with_image(
        &self,
        model: &str,
        prompt: &str,
        image_b64: &str,
        mime_type: &str,
    ) -> Result<String, ModelError>;

    /// Enumerate the models available to this credential.
    fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError>;
}

/// Errors from provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No API credential configured — set GOOGLE_API_KEY")]
    MissingCredential,

    #[error("Cannot reach the model provider at {0}")]
    NotReachable(String),

    #[error("Provider returned an error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse provider response: {0}")]
    ResponseParsing(String),

    #[error("Provider response contained no generated text")]
    EmptyResponse,
}
