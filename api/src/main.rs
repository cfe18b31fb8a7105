use anyhow::{Context, Result};
use api::{config::ApiConfig, router, AppState};
use coach_core::OpenAiService;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ApiConfig::from_env()?;
    let chat = OpenAiService::from_env()?;
    let state = AppState::new(Arc::new(chat)).context("failed to build page templates")?;

    let app = router(state, config.max_request_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    log::info!("Hot Mess Coach listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
