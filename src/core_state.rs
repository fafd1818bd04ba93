//! Process-wide read-only state.
//!
//! `CoreState` holds everything initialized once at boot: the provider
//! client, the selected model identifier, and the fuzzy dictionary index.
//! It is shared via `Arc` and never written after construction, so request
//! handlers need no synchronization to read it.

use std::sync::Arc;

use crate::extract::spelling::SpellIndex;
use crate::model::types::VisionClient;

pub struct CoreState {
    vision: Arc<dyn VisionClient>,
    active_model: String,
    dictionary: SpellIndex,
}

impl CoreState {
    pub fn new(
        vision: Arc<dyn VisionClient>,
        active_model: String,
        dictionary: SpellIndex,
    ) -> Self {
        Self {
            vision,
            active_model,
            dictionary,
        }
    }

    /// The provider client, cloned cheaply for blocking-task handoff.
    pub fn vision(&self) -> Arc<dyn VisionClient> {
        Arc::clone(&self.vision)
    }

    /// Model identifier selected at boot.
    pub fn active_model(&self) -> &str {
        &self.active_model
    }

    /// Fuzzy medical-term index. May be empty — lookups then never match.
    pub fn dictionary(&self) -> &SpellIndex {
        &self.dictionary
    }
}
