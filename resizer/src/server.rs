use std::sync::Arc;

use axum::{Extension, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{derivative::DerivativeGenerator, routes};

/// Builds the application router with its dependencies attached
#[must_use]
pub fn router(generator: Arc<DerivativeGenerator>) -> Router {
    routes::handler()
        .layer(Extension(generator))
        .layer(TraceLayer::new_for_http())
}

/// Whether the process was started by the AWS Lambda runtime
#[must_use]
pub fn running_in_lambda() -> bool {
    std::env::var("AWS_LAMBDA_RUNTIME_API").is_ok()
}

/// Starts serving the resize handler
///
/// Inside Lambda the router is driven by the API Gateway event loop; anywhere
/// else it listens on `$PORT` (default 8002).
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(generator: Arc<DerivativeGenerator>) -> anyhow::Result<()> {
    let router = router(generator);

    if running_in_lambda() {
        tracing::info!("🔄 Resizer started as Lambda function");
        return lambda_http::run(router)
            .await
            .map_err(|e| anyhow::anyhow!(e));
    }

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8002), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Resizer started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on Ctrl+C or SIGTERM
///
/// # Panics
///
/// Panics if the signal handlers cannot be installed
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
