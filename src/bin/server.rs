use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

use studyaid::config::{get_config, CliArgs};
use studyaid::generator::{FlashcardGenerator, GeminiGenerator};
use studyaid::store::Store;
use studyaid::{create_app, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let config = get_config(&args);

    let log_dir = config.log_to_file.then(|| config.data_dir.join("logs"));
    // Held until shutdown so buffered file logs get flushed
    let _log_guard = logging::init(args.debug, args.log_json, log_dir.as_deref())?;

    info!(
        data_dir = %config.data_dir.display(),
        max_upload_mb = config.max_upload_mb,
        model = %config.gemini_model,
        "Loaded configuration"
    );

    let store = Store::open(config.data_dir.clone())
        .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;

    let generator: Option<Arc<dyn FlashcardGenerator>> = match config.gemini_api_key.clone() {
        Some(api_key) if !api_key.trim().is_empty() => Some(Arc::new(GeminiGenerator::new(
            config.gemini_base_url.clone(),
            api_key,
            config.gemini_model.clone(),
        ))),
        _ => {
            warn!("No GEMINI_API_KEY configured, document processing is disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(store, generator));
    let app = create_app(state, config.max_upload_bytes());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
