//! OAuth 2.0 authorization code grant: client registry, consent staging and redirects.

pub mod auth_server;
pub mod clients;
pub mod redirect;
pub mod types;

// Re-export frequently used items from each module
pub use crate::storage::{
    inmemory::MemoryOAuthStorage,
    traits::{OAuthClientStore, OAuthStorage, PendingRequestStore},
};
pub use auth_server::{
    ApprovalResponse, ApproveView, AuthorizationServer, ErrorView, RedirectErrorKind,
    RequestError, ViewDirective,
};
pub use clients::{ClientRegistrationService, create_client};
pub use redirect::build_redirect_url;
pub use types::{
    ApprovalDecision, AuthorizeQuery, Client, ClientParams, PendingAuthorizationRequest,
    generate_client_id, generate_token,
};
