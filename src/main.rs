mod config;
mod handlers;
mod models;
mod prompts;
mod services;
mod web;

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::AnalysisHandler;
use services::GeminiService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables first so RUST_LOG from .env applies
    dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting Nutrition Monitor...");

    let config = Config::from_env()?;

    let gemini = Arc::new(GeminiService::new(&config)?);
    log::info!("✅ Gemini service initialized with model: {}", gemini.model());

    let analysis_handler = Arc::new(AnalysisHandler::new(gemini));
    log::info!("✅ Analysis handler initialized");

    let app = web::create_router(
        analysis_handler,
        &config.static_dir,
        config.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind web server on {}", config.bind_addr))?;

    log::info!("🌐 Web server listening on {}", config.bind_addr);
    println!("\n🥕 Nutrition Monitor is running!");
    println!("🌐 Open http://{} in your browser", config.bind_addr);
    println!("🛑 Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    log::info!("🛑 Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
    log::info!("🛑 Shutting down...");
}
