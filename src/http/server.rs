//! Main router configuration assembling the consent flow and client API endpoints.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    context::AppState,
    handler_approve::handle_approve,
    handler_authorize::handle_authorize,
    handler_clients::{get_client_handler, register_client_handler},
    handler_index::handle_index,
};

/// Build the application router
pub fn build_router(ctx: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handle_index))
        .route("/authorize", get(handle_authorize))
        .route("/approve", post(handle_approve));

    // Conditionally add client API endpoints
    if *ctx.config.enable_client_api.as_ref() {
        router = router
            .route("/clients/register", post(register_client_handler))
            .route("/clients/{client_id}", get(get_client_handler));
    }

    router.layer(TraceLayer::new_for_http()).with_state(ctx)
}
