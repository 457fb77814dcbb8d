//! Turns authorization server directives into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_template::RenderHtml;

use super::context::AppEngine;
use crate::oauth::auth_server::{ApprovalResponse, ViewDirective};

/// Render a view directive; error views answer 400, everything else 200
pub(crate) fn render_view(engine: AppEngine, view: ViewDirective) -> Response {
    let status = match view {
        ViewDirective::Error(_) => StatusCode::BAD_REQUEST,
        ViewDirective::Approve(_) => StatusCode::OK,
    };
    (status, RenderHtml(view.template(), engine, view)).into_response()
}

/// Render an approval outcome; redirects are `303 See Other`
pub(crate) fn render_approval(engine: AppEngine, response: ApprovalResponse) -> Response {
    match response {
        ApprovalResponse::View(view) => render_view(engine, view),
        ApprovalResponse::Redirect(location) => Redirect::to(&location).into_response(),
    }
}
