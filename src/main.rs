//! Docsmith server entrypoint: load configuration, wire the adapters into the
//! pipeline and serve the HTTP interface.

use std::process::exit;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use docsmith::adapters::ai::{GeminiConfig, GeminiGenerator};
use docsmith::adapters::http::{app_router, AppState};
use docsmith::adapters::pdf::PlainTextPdfRenderer;
use docsmith::adapters::storage::LocalArtifactStore;
use docsmith::application::DocumentPipeline;
use docsmith::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("configuration error: {message}");
            exit(1);
        }
    };

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // load_config() validated the key is present and non-empty.
    let api_key = config
        .ai
        .gemini_api_key
        .clone()
        .expect("validated configuration carries an API key");

    let generator = GeminiGenerator::new(
        GeminiConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_timeout(config.ai.timeout()),
    );

    let storage_dir = config.storage.resolve_directory();
    let store = Arc::new(LocalArtifactStore::new(&storage_dir));

    let pipeline = Arc::new(DocumentPipeline::new(
        Arc::new(generator),
        Arc::new(PlainTextPdfRenderer::new()),
        store.clone(),
    ));

    let state = AppState::new(
        pipeline,
        store,
        config.server.base_url(),
        config.server.delivery,
    );
    let router = app_router(state);

    let addr = config.server.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind listener");
            exit(1);
        }
    };

    info!(
        %addr,
        model = %config.ai.model,
        storage = %storage_dir.display(),
        delivery = ?config.server.delivery,
        "docsmith listening"
    );

    if let Err(e) = axum::serve(listener, router).await {
        error!(error = %e, "server terminated");
        exit(1);
    }
}

/// Loads and validates configuration, flattening errors into one message so
/// the process can fail fast before any adapter is constructed.
fn load_config() -> Result<AppConfig, String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
