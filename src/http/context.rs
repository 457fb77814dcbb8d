//! Application state shared by every handler.

use axum_template::engine::Engine;
use std::sync::Arc;

use crate::config::Config;
use crate::oauth::{auth_server::AuthorizationServer, clients::ClientRegistrationService};
use crate::storage::traits::OAuthStorage;

#[cfg(feature = "reload")]
use minijinja_autoreload::AutoReloader;

#[cfg(feature = "reload")]
/// Template engine with auto-reloading support for development.
pub type AppEngine = Engine<AutoReloader>;

#[cfg(feature = "embed")]
use minijinja::Environment;

#[cfg(feature = "embed")]
pub type AppEngine = Engine<Environment<'static>>;

#[cfg(not(any(feature = "reload", feature = "embed")))]
pub type AppEngine = Engine<minijinja::Environment<'static>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Template engine for rendering HTML responses.
    pub template_env: AppEngine,
    /// Client registration service backing the client API and bootstrap
    pub client_registration_service: Arc<ClientRegistrationService>,
    /// Authorization and approval handlers
    pub authorization_server: Arc<AuthorizationServer>,
}

impl AppState {
    /// Wire the services around a single storage backend
    pub fn new(
        config: Arc<Config>,
        template_env: AppEngine,
        oauth_storage: Arc<dyn OAuthStorage>,
    ) -> Self {
        let client_registration_service =
            Arc::new(ClientRegistrationService::new(oauth_storage.clone()));
        let authorization_server = Arc::new(AuthorizationServer::new(oauth_storage));

        Self {
            config,
            template_env,
            client_registration_service,
            authorization_server,
        }
    }
}
