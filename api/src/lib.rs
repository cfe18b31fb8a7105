pub mod config;
pub mod form;
pub mod handlers;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use coach_core::{ChatClient, CoachService, PageRenderer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub coach: Arc<CoachService>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(chat: Arc<dyn ChatClient>) -> Result<Self> {
        Ok(Self {
            coach: Arc::new(CoachService::new(chat)),
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}

pub fn router(state: AppState, max_request_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::show_form).post(handlers::submit_form))
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(max_request_bytes))
        .with_state(state)
}
