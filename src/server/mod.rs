//! Web UI and JSON API.
//!
//! | Route               | Purpose                                   |
//! |---------------------|-------------------------------------------|
//! | `GET /`             | Submission form                           |
//! | `POST /analyze`     | Form submission, re-renders the page      |
//! | `POST /api/analyze` | JSON `{text, include_source}` → report    |
//! | `GET /health`       | Liveness probe                            |

pub mod handlers;
pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::analysis_service::AnalysisService;
use crate::config::ServerConfig;
use crate::error::{Result, VerazError};
use crate::ml::InferenceService;
use crate::summary::Summarizer;

/// Shared, read-only state of every request.
pub type AppState = Arc<AnalysisService>;

/// Build the router over an analysis service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze_form))
        .route("/api/analyze", post(handlers::analyze_json))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Load the model and serve until the process is stopped.
///
/// Fails before binding if the model cannot be loaded.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let inference = InferenceService::load(&config.model_path)?;
    let summarizer = Summarizer::from_config(&config.summary)?;
    let state = Arc::new(AnalysisService::new(
        Arc::new(inference),
        Arc::new(summarizer),
    ));

    let addr: SocketAddr = config.bind.parse().map_err(|e| {
        VerazError::invalid_argument(format!("invalid bind address '{}': {e}", config.bind))
    })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[tokio::test]
    async fn test_serve_refuses_without_model() {
        let config = ServerConfig {
            model_path: PathBuf::from("/nonexistent/model.json"),
            ..ServerConfig::default()
        };
        let err = serve(&config).await.unwrap_err();
        assert!(matches!(err, VerazError::ModelNotFound(_)));
    }
}
