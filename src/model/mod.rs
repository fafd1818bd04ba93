//! Generative vision provider: wire client, startup model selection, and
//! the trait seam that keeps handlers testable without network access.

pub mod gemini;
pub mod select;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{ModelError, ModelInfo, VisionClient};
