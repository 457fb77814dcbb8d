//! Storage trait definitions for clients and staged authorization requests.
//!
//! Defines async storage interfaces that can be implemented by various backend
//! providers. The server only ships the in-memory backend.

use crate::errors::StorageError;
use crate::oauth::types::*;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Trait for storing and retrieving OAuth clients
#[async_trait]
pub trait OAuthClientStore {
    /// Append a new client; fails if the client ID is already taken
    async fn store_client(&self, client: &Client) -> Result<()>;

    /// Retrieve a client by ID
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>>;

    /// List all clients in registration order
    async fn list_clients(&self) -> Result<Vec<Client>>;
}

/// Trait for staging authorization requests awaiting consent
#[async_trait]
pub trait PendingRequestStore {
    /// Stage a request under its request ID
    async fn store_pending_request(&self, request: &PendingAuthorizationRequest) -> Result<()>;

    /// Remove and return a staged request.
    ///
    /// Lookup and removal happen as one step: of any number of concurrent callers
    /// with the same ID, at most one receives the request.
    async fn take_pending_request(
        &self,
        request_id: &str,
    ) -> Result<Option<PendingAuthorizationRequest>>;
}

/// Unified storage used by the authorization server
pub trait OAuthStorage: OAuthClientStore + PendingRequestStore + Send + Sync {}
