// src/main.rs

use dotenvy::dotenv;
use mock_exam::assistant::{Assistant, GeminiClient, ReplyGenerator};
use mock_exam::config::Config;
use mock_exam::exam::store::BankStore;
use mock_exam::routes;
use mock_exam::state::AppState;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Build (or load) the question bank before accepting requests
    let store = Arc::new(BankStore::new(&config.bank_path, &config.source_path));
    let warm = store.clone();
    let bank = tokio::task::spawn_blocking(move || warm.bank()).await?;
    tracing::info!(
        physics = bank.physics.len(),
        chemistry = bank.chemistry.len(),
        biology = bank.biology.len(),
        "Question bank ready"
    );

    let assistant = match &config.google_api_key {
        Some(key) => {
            let client: Arc<dyn ReplyGenerator> =
                Arc::new(GeminiClient::new(key, &config.gemini_model, None)?);
            tracing::info!("Assistant enabled with model {}", config.gemini_model);
            Assistant::new(Some(client))
        }
        None => {
            tracing::error!("GOOGLE_API_KEY not found, assistant replies are disabled");
            Assistant::disabled()
        }
    };

    // Create AppState
    let state = AppState { store, assistant };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
