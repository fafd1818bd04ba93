//! Gemini HTTP client for vision generation.
//!
//! Speaks the generative-language REST API: `GET /models` for enumeration,
//! `POST /models/{model}:generateContent` with an inline base64 image for
//! generation. The credential travels as the `key` query parameter.

use serde::{Deserialize, Serialize};

use super::types::{ModelError, ModelInfo, VisionClient};

/// Gemini REST client. Blocking — callers run it off the async executor.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Listing returns names as `models/<id>`; the fallback constant is bare.
    /// Accept both by stripping before rebuilding the path.
    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    fn list_url(&self) -> String {
        format!("{}/models?key={}", self.base_url, self.api_key)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ModelError {
        if e.is_connect() {
            ModelError::NotReachable(self.base_url.clone())
        } else if e.is_timeout() {
            ModelError::Timeout(self.timeout_secs)
        } else {
            ModelError::Network(e.to_string())
        }
    }
}

// ──────────────────────────────────────────────
// Wire format
// ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Image { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

/// Temperature 0.0 — extraction wants deterministic output.
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

// ──────────────────────────────────────────────
// VisionClient impl
// ──────────────────────────────────────────────

impl VisionClient for GeminiClient {
    fn generate_with_image(
        &self,
        model: &str,
        prompt: &str,
        image_b64: &str,
        mime_type: &str,
    ) -> Result<String, ModelError> {
        if self.api_key.is_empty() {
            return Err(ModelError::MissingCredential);
        }

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: prompt },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type,
                            data: image_b64,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ModelError::ResponseParsing(e.to_string()))?;

        if let Some(err) = parsed.error {
            return Err(ModelError::ApiError {
                status: err.code,
                message: err.message,
            });
        }

        let text = parsed
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        if self.api_key.is_empty() {
            return Err(ModelError::MissingCredential);
        }

        let response = self
            .client
            .get(self.list_url())
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: ListModelsResponse = response
            .json()
            .map_err(|e| ModelError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models)
    }
}

// ──────────────────────────────────────────────
// MockVisionClient (testing)
// ──────────────────────────────────────────────

/// Mock provider client — configurable response, model list, and failure modes.
pub struct MockVisionClient {
    response: String,
    models: Vec<ModelInfo>,
    fail_generate: bool,
    fail_list: bool,
}

impl MockVisionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            models: Vec::new(),
            fail_generate: false,
            fail_list: false,
        }
    }

    pub fn with_models(mut self, models: Vec<ModelInfo>) -> Self {
        self.models = models;
        self
    }

    /// Every `generate_with_image` call fails as unreachable.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            models: Vec::new(),
            fail_generate: true,
            fail_list: false,
        }
    }

    /// Model enumeration fails as unreachable.
    pub fn with_list_failure(mut self) -> Self {
        self.fail_list = true;
        self
    }
}

impl VisionClient for MockVisionClient {
    fn generate_with_image(
        &self,
        _model: &str,
        _prompt: &str,
        _image_b64: &str,
        _mime_type: &str,
    ) -> Result<String, ModelError> {
        if self.fail_generate {
            return Err(ModelError::NotReachable("mock".into()));
        }
        Ok(self.response.clone())
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        if self.fail_list {
            return Err(ModelError::NotReachable("mock".into()));
        }
        Ok(self.models.clone())
    }
}
