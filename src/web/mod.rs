pub mod handlers;
pub mod markdown;
pub mod routes;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, TeachkitError};
use crate::llm::GeminiClient;

pub async fn serve(
    config: Config,
    client: Arc<GeminiClient>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let bind = config.bind.clone();
    let app = routes::build(config, client);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| TeachkitError::Config(format!("failed to bind {bind}: {e}")))?;

    info!(bind = %bind, "teachkit listening (HTTP)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
        .map_err(|e| TeachkitError::Config(format!("server error: {e}")))?;

    Ok(())
}
