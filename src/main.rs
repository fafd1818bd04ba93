use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medshare_api::api::server::start_api_server;
use medshare_api::config::{Config, APP_VERSION};
use medshare_api::core_state::CoreState;
use medshare_api::extract::dictionary;
use medshare_api::model::gemini::GeminiClient;
use medshare_api::model::select::select_active_model;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("MedShare API starting v{APP_VERSION}");

    let config = Config::from_env();
    if config.api_key.is_empty() {
        tracing::error!("GOOGLE_API_KEY not set — model calls will fail upstream");
    }

    // Startup is deliberately blocking: model selection and the dictionary
    // fetch are one-shot, and the HTTP client they use is the blocking one.
    // The async runtime starts only once the read-only state exists.
    let vision = Arc::new(GeminiClient::new(
        &config.gemini_base_url,
        &config.api_key,
        config.request_timeout_secs,
    ));
    let active_model = select_active_model(vision.as_ref());
    let dictionary =
        dictionary::load_or_fetch(&config.dictionary_path, dictionary::DEFAULT_WORDLIST_URL);

    let core = Arc::new(CoreState::new(vision, active_model, dictionary));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let mut server = match start_api_server(core, config.port).await {
            Ok(server) => server,
            Err(e) => {
                tracing::error!("Failed to start API server: {e}");
                std::process::exit(1);
            }
        };
        tracing::info!(
            addr = %server.session.server_addr,
            session_id = %server.session.session_id,
            "MedShare API is live"
        );

        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
        }
        server.shutdown();
    });
}
