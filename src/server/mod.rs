pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    dispatch::{ConversationFlag, DispatchQueue, Dispatcher},
    line::LineClient,
    llm::GeminiClient,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/webhook", post(handlers::webhook))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let model = Arc::new(GeminiClient::new(config.model.clone()));
    let messenger = Arc::new(LineClient::new(config.line.clone()));
    let conversation = ConversationFlag::new(config.conversation.default_talking);

    info!(
        "Using model {} (conversation enabled: {})",
        model.model(),
        conversation.is_enabled()
    );

    let dispatcher = Arc::new(Dispatcher::new(model, messenger, conversation));
    let (queue, worker) = DispatchQueue::start(dispatcher);

    let app = router(AppState {
        queue,
        channel_secret: Arc::from(config.line.channel_secret.as_str()),
    });

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last queue handle; the worker now drains and exits.
    info!("Server stopped, waiting for in-flight dispatches");
    if let Err(e) = worker.await {
        error!("Dispatch worker ended abnormally: {}", e);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
