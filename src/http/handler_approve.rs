//! Handles POST /approve - Resolves the resource owner's consent decision

use axum::{
    extract::{Form, State},
    response::Response,
};

use super::{context::AppState, utils_views::render_approval};
use crate::{errors::Result, oauth::types::ApprovalDecision};

pub async fn handle_approve(
    State(state): State<AppState>,
    Form(decision): Form<ApprovalDecision>,
) -> Result<Response> {
    let response = state.authorization_server.approve(decision).await?;
    Ok(render_approval(state.template_env.clone(), response))
}
