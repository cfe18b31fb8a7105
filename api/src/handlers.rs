use crate::{form, AppState};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Json},
};
use coach_core::PageState;

type HandlerResult = Result<Html<String>, (StatusCode, String)>;

pub async fn show_form(State(state): State<AppState>) -> HandlerResult {
    render(&state, &PageState::default())
}

pub async fn submit_form(State(state): State<AppState>, multipart: Multipart) -> HandlerResult {
    let submission = form::read_submission(multipart).await.map_err(|e| {
        log::warn!("Rejected malformed form: {}", e);
        (StatusCode::BAD_REQUEST, format!("Invalid form submission: {}", e))
    })?;

    let page = state.coach.handle_submission(submission).await;
    match (&page.reply, &page.error) {
        (_, Some(error)) => log::info!("Form submission ended with error: {}", error),
        (Some(_), None) => log::info!("Form submission answered"),
        (None, None) => log::info!("Form submission rendered without a model call"),
    }

    render(&state, &page)
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hot-mess-coach",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn render(state: &AppState, page: &PageState) -> HandlerResult {
    state.pages.render(page).map(Html).map_err(|e| {
        log::error!("Failed to render page: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page".to_string())
    })
}
