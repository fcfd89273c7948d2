use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::llm::GeminiClient;

use super::handlers;

/// State shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Arc<GeminiClient>,
}

pub fn build(config: Config, client: Arc<GeminiClient>) -> Router {
    let state = AppState { config, client };

    Router::new()
        // Page UI
        .route("/", get(serve_index))
        .route("/style.css", get(serve_css))
        .route("/app.js", get(serve_js))
        // API
        .route("/api/generate", post(handlers::generate))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

async fn serve_index(State(state): State<AppState>) -> axum::response::Html<String> {
    let page = include_str!("ui/index.html").replace("{{page_title}}", &state.config.page_title);
    axum::response::Html(page)
}

async fn serve_css() -> (axum::http::HeaderMap, &'static str) {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        "text/css".parse().unwrap(),
    );
    (headers, include_str!("ui/style.css"))
}

async fn serve_js() -> (axum::http::HeaderMap, &'static str) {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        "application/javascript".parse().unwrap(),
    );
    (headers, include_str!("ui/app.js"))
}
