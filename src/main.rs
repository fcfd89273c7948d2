mod config;
mod error;
mod forms;
mod llm;
mod prompts;
mod web;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{error, info};

use crate::config::Config;
use crate::llm::GeminiClient;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything reads env vars
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if args.iter().any(|a| a == "--default-config") {
        print!("{}", Config::default_config_contents());
        return;
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load config
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let config = match Config::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    info!(
        bind = %config.bind,
        model = %config.llm.model,
        "teachkit starting"
    );

    // Handle --check
    if args.iter().any(|a| a == "--check") {
        run_checks(&config);
        return;
    }

    // The API key must be present at startup; without it no tool can be
    // served, so refuse to start at all.
    let api_key = match Config::gemini_api_key() {
        Ok(k) => k,
        Err(e) => {
            error!("cannot start without an API key: {e}");
            std::process::exit(1);
        }
    };

    let client = match GeminiClient::new(&config, api_key) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("failed to initialize Gemini client: {e}");
            std::process::exit(1);
        }
    };

    // Shutdown signal
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    // Start the web server
    let server_handle = {
        let config = config.clone();
        let client = client.clone();
        let shutdown_rx = shutdown_tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = web::serve(config, client, shutdown_rx).await {
                error!("server error: {e}");
                std::process::exit(1);
            }
        })
    };

    info!("teachkit is running — press Ctrl+C to stop");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");

    info!("shutdown signal received, stopping...");
    let _ = shutdown_tx.send(());

    let _ = server_handle.await;
    info!("teachkit stopped");
}

fn run_checks(config: &Config) {
    info!("running pre-flight checks...");

    info!("config: OK");
    info!("  bind: {}", config.bind);
    info!("  page_title: {}", config.page_title);
    info!("  model: {}", config.llm.model);
    if config.llm.base_url.is_empty() {
        info!("  base_url: (default public endpoint)");
    } else {
        info!("  base_url: {}", config.llm.base_url);
    }

    match Config::gemini_api_key() {
        Ok(_) => info!("GEMINI_API_KEY / GOOGLE_API_KEY: set"),
        Err(_) => error!("GEMINI_API_KEY / GOOGLE_API_KEY: NOT SET (required)"),
    }
}

fn print_usage() {
    println!(
        "teachkit — web toolkit for teachers: lesson plans, quizzes, and concept explanations

USAGE:
    teachkit [OPTIONS]

OPTIONS:
    --config <PATH>     Path to config file (default: ~/.config/teachkit/config.toml)
    --default-config    Print default config to stdout and exit
    --check             Validate config and credentials, then exit
    -h, --help          Print this help message

ENVIRONMENT:
    GEMINI_API_KEY      Required. Google AI Studio API key.
    GOOGLE_API_KEY      Alternative name for the same key.
    GEMINI_MODEL        Optional. Model override (default: gemini-1.5-flash).
    GEMINI_BASE_URL     Optional. API base URL override.
    RUST_LOG            Optional. Tracing filter (default: info).
"
    );
}
