use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_system::{config::Config, controllers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema System API");

    // Build the engine and hydrate it from the last snapshot
    let app_state = AppState::new(config.clone()).await;
    info!("Engine hydrated from {}", config.storage.data_dir);

    // --- Start background tasks ---

    // Periodic snapshot checkpoint; a failed write is logged and retried
    // on the next tick, in-memory state is never rolled back.
    let autosave_state = app_state.clone();
    let interval = Duration::from_secs(config.storage.autosave_interval_secs);
    task::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            if let Err(e) = autosave_state.store.save(&autosave_state.engine).await {
                error!("autosave failed: {e}");
            }
        }
    });

    // --- Start the web server ---

    let app = Router::new()
        .route("/", get(|| async { "Cinema System API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        // Pass the application state to the router
        .with_state(app_state.clone())
        // Browser clients are served from a separate origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
