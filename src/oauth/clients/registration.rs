//! Client registry: validation, credential generation, registration and lookup.

use crate::errors::ClientRegistrationError;
use crate::oauth::types::*;
use crate::storage::traits::OAuthStorage;
use std::sync::Arc;
use url::Url;

/// Build a new client from registration parameters.
///
/// Pure factory: generates fresh credentials but does not touch any registry.
/// Every redirect URI must parse as an absolute URL.
pub fn create_client(params: ClientParams) -> Result<Client, ClientRegistrationError> {
    let redirect_uris = match params.redirect_uris {
        Some(redirect_uris) if !redirect_uris.is_empty() => redirect_uris,
        Some(_) => {
            return Err(ClientRegistrationError::InvalidClientParameters(
                "redirect_uris must not be empty".to_string(),
            ));
        }
        None => {
            return Err(ClientRegistrationError::InvalidClientParameters(
                "redirect_uris is required".to_string(),
            ));
        }
    };

    for redirect_uri in &redirect_uris {
        Url::parse(redirect_uri).map_err(|e| {
            ClientRegistrationError::InvalidClientParameters(format!(
                "redirect URI '{}' is not an absolute URL: {}",
                redirect_uri, e
            ))
        })?;
    }

    Ok(Client {
        client_id: generate_client_id(),
        client_secret: generate_token(),
        redirect_uris,
    })
}

/// Client Registration Service
pub struct ClientRegistrationService {
    storage: Arc<dyn OAuthStorage>,
}

impl ClientRegistrationService {
    /// Create a new client registration service
    pub fn new(storage: Arc<dyn OAuthStorage>) -> Self {
        Self { storage }
    }

    /// Register a new OAuth client
    pub async fn register_client(
        &self,
        params: ClientParams,
    ) -> Result<Client, ClientRegistrationError> {
        let client = create_client(params)?;

        self.storage.store_client(&client).await.map_err(|e| {
            ClientRegistrationError::StorageFailed(format!("Failed to store client: {}", e))
        })?;

        tracing::info!(
            client_id = %client.client_id,
            redirect_uris = ?client.redirect_uris,
            "registered client"
        );

        Ok(client)
    }

    /// Look up a client; `Ok(None)` when no such client is registered
    pub async fn get_client(
        &self,
        client_id: &str,
    ) -> Result<Option<Client>, ClientRegistrationError> {
        self.storage
            .get_client(client_id)
            .await
            .map_err(|e| ClientRegistrationError::StorageFailed(e.to_string()))
    }

    /// All registered clients, oldest first
    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientRegistrationError> {
        self.storage
            .list_clients()
            .await
            .map_err(|e| ClientRegistrationError::StorageFailed(e.to_string()))
    }
}
