//! Axum HTTP server: consent flow pages and the client registry API.

pub mod context;
mod handler_approve;
mod handler_authorize;
mod handler_clients;
mod handler_index;
pub mod server;
mod utils_views;

pub use context::{AppEngine, AppState};
pub use server::build_router;
