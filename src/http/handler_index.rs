//! Handles GET / - Lists the registered clients

use axum::{extract::State, response::IntoResponse};
use axum_template::RenderHtml;
use minijinja::context;

use super::context::AppState;
use crate::errors::{HttpError, Result};

/// Handle requests to the index page
pub async fn handle_index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let clients = state
        .client_registration_service
        .list_clients()
        .await
        .map_err(|e| HttpError::RequestProcessingFailed(e.to_string()))?;

    Ok(RenderHtml(
        "index.html",
        state.template_env.clone(),
        context! {
            clients => clients,
        },
    ))
}
