//! Composition root: shared state, routing and the serve loop.
//!
//! Startup order is fixed. The broker connection is opened before the
//! listener is bound, so a bad broker configuration never accepts traffic.

use std::{path::PathBuf, sync::Arc};

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use webhook_relay_core::Publisher;
use webhook_relay_rabbitmq::AmqpPublisher;

use crate::{config::Config, error::Result, handlers};

/// State shared by every request task.
///
/// All requests publish through the same `publisher`; it is never replaced
/// for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<dyn Publisher>,
    pub routing_key: Arc<str>,
    pub redirect_page: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        publisher: Arc<dyn Publisher>,
        routing_key: impl Into<Arc<str>>,
        redirect_page: impl Into<PathBuf>,
    ) -> Self {
        Self {
            publisher,
            routing_key: routing_key.into(),
            redirect_page: Arc::new(redirect_page.into()),
        }
    }
}

/// Builds the router.
///
/// `/redirect` serves the static page. Every other path, including `/`,
/// goes to the relay handler, for any method.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::relay_webhook))
        .route("/redirect", any(handlers::redirect_page))
        .fallback(handlers::relay_webhook)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Connects to the broker, then serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Any broker connection failure, an unusable listen address, or a bind
/// failure. Nothing is listening when an error is returned from startup.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.listen_addr()?;

    let publisher = Arc::new(AmqpPublisher::connect(config.amqp_options()).await?);
    let state = AppState::new(
        publisher.clone(),
        config.routing_key.as_str(),
        config.redirect_page.clone(),
    );

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");

    if let Err(e) = publisher.close().await {
        warn!(error = %e, "Failed to close broker connection cleanly");
    }
    Ok(())
}

/// Waits for CTRL+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received CTRL+C, starting graceful shutdown");
        },
        () = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
