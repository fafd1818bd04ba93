//! Medical wordlist cache and index construction.
//!
//! The wordlist is fetched once into a local cache file; every failure mode
//! degrades to a smaller (possibly empty) index rather than failing boot.

use std::path::Path;
use std::time::Duration;

use super::spelling::SpellIndex;

/// Remote wordlist fetched into the local cache when absent.
pub const DEFAULT_WORDLIST_URL: &str =
    "https://raw.githubusercontent.com/glutanimate/wordlist-medicalterms-en/master/wordlist.txt";

const FETCH_TIMEOUT_SECS: u64 = 30;

/// Errors from the one-shot wordlist fetch. Logged, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Cache write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Load the dictionary index, fetching the wordlist into `path` first if
/// the cache file is absent.
pub fn load_or_fetch(path: &Path, url: &str) -> SpellIndex {
    if !path.exists() {
        if let Err(e) = fetch_wordlist(path, url) {
            tracing::warn!(error = %e, "Dictionary download failed, continuing without it");
        }
    }

    let index = match std::fs::read_to_string(path) {
        Ok(contents) => SpellIndex::from_lines(contents.lines()),
        Err(_) => SpellIndex::empty(),
    };

    tracing::info!(terms = index.len(), "Dictionary index ready");
    index
}

fn fetch_wordlist(path: &Path, url: &str) -> Result<(), DictionaryError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| DictionaryError::Fetch(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| DictionaryError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DictionaryError::Fetch(format!("HTTP {status}")));
    }

    let body = response
        .text()
        .map_err(|e| DictionaryError::Fetch(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;

    tracing::info!(path = %path.display(), "Dictionary wordlist cached");
    Ok(())
}
