// Gemini Vision Pro - image analysis studio powered by Google Gemini
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use gemini_vision_pro::cli::Args;
use gemini_vision_pro::config::{load_api_key, AppConfig};
use gemini_vision_pro::gemini::GeminiClient;
use gemini_vision_pro::server::create_router;
use gemini_vision_pro::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so it can feed both flags and the API key
    let dotenv = dotenvy::dotenv();

    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting gemini-vision-pro v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    // Phase 3: Load the API key
    let api_key = load_api_key(&config.gemini.api_key_env);

    // Phase 4: Build the Gemini client
    let gemini_client = GeminiClient::with_pool_size(
        &config.gemini,
        api_key,
        config.performance.connection_pool_size,
    )?;
    info!("Using model {}", gemini_client.model());

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), gemini_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    if args.open {
        let url = format!("http://{}", addr);
        if let Err(e) = open::that(&url) {
            warn!("Could not open browser at {}: {}", url, e);
        }
    }

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
