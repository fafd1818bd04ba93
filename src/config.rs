use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MedShare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Google generative-language API base (override with `GEMINI_BASE_URL`).
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Per-request timeout for model calls. Vision generation on large images
/// is slow; the provider default would cut it off.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/MedShare/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MedShare")
}

/// Default location of the cached medical wordlist.
pub fn default_dictionary_path() -> PathBuf {
    app_data_dir().join("medicine_list.txt")
}

/// Environment-derived service configuration, read once at boot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API credential. Empty when unset — model calls then fail upstream.
    pub api_key: String,
    /// Listening port.
    pub port: u16,
    /// Local cache file for the medical wordlist.
    pub dictionary_path: PathBuf,
    /// Provider base URL.
    pub gemini_base_url: String,
    /// Model call timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GOOGLE_API_KEY").unwrap_or_default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let dictionary_path = std::env::var("MEDSHARE_DICT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_dictionary_path());
        let gemini_base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        Self {
            api_key,
            port,
            dictionary_path,
            gemini_base_url,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
