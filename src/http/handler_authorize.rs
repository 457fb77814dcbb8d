//! Handles GET /authorize - Stages an authorization request and asks for consent

use axum::{
    extract::{Query, State},
    response::Response,
};

use super::{context::AppState, utils_views::render_view};
use crate::{errors::Result, oauth::types::AuthorizeQuery};

pub async fn handle_authorize(
    State(state): State<AppState>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Response> {
    let view = state.authorization_server.authorize(query).await?;
    Ok(render_view(state.template_env.clone(), view))
}
