//! hookfeed-server - HTTP server binary.

use hookfeed_server::{create_server, AppState, ServerConfig};
use hookfeed_stores::EventStoreFactory;
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json switches to structured output
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json()))
        .with((!json_logs).then(fmt::layer))
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("hookfeed_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store = EventStoreFactory::create(config.store.clone()).await?;
    info!(
        store = store.name(),
        database = %config.store.database,
        collection = %config.store.collection,
        "Event store configured"
    );

    if !config.static_dir.join("index.html").is_file() {
        warn!(static_dir = %config.static_dir.display(), "No index.html in STATIC_DIR; / will return 404");
    }

    let state = AppState::new(store);
    let app = create_server(state, &config.static_dir);

    // Start server
    let addr = config.socket_addr()?;
    info!("Starting hookfeed-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
