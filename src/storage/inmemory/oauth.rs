//! In-memory OAuth storage implementation
//!
//! This module provides in-memory implementations for the client registry and the
//! pending authorization request store. Nothing survives a restart.

use crate::errors::StorageError;
use crate::oauth::types::*;
use crate::storage::traits::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Append-only client table: insertion order plus an index by client ID
#[derive(Default)]
struct ClientTable {
    ordered: Vec<Client>,
    index: HashMap<String, usize>,
}

/// In-memory implementation for OAuth storage
#[derive(Default)]
pub struct MemoryOAuthStorage {
    clients: Mutex<ClientTable>,
    pending_requests: Mutex<HashMap<String, PendingAuthorizationRequest>>,
}

impl MemoryOAuthStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::OperationFailed(format!("Lock error: {}", e))
}

#[async_trait]
impl OAuthClientStore for MemoryOAuthStorage {
    async fn store_client(&self, client: &Client) -> Result<()> {
        let mut clients = self.clients.lock().map_err(lock_error)?;
        if clients.index.contains_key(&client.client_id) {
            return Err(StorageError::DuplicateKey(client.client_id.clone()));
        }
        let position = clients.ordered.len();
        clients.index.insert(client.client_id.clone(), position);
        clients.ordered.push(client.clone());
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let clients = self.clients.lock().map_err(lock_error)?;
        Ok(clients
            .index
            .get(client_id)
            .and_then(|position| clients.ordered.get(*position))
            .cloned())
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = self.clients.lock().map_err(lock_error)?;
        Ok(clients.ordered.clone())
    }
}

#[async_trait]
impl PendingRequestStore for MemoryOAuthStorage {
    async fn store_pending_request(&self, request: &PendingAuthorizationRequest) -> Result<()> {
        let mut requests = self.pending_requests.lock().map_err(lock_error)?;
        if requests.contains_key(&request.request_id) {
            return Err(StorageError::DuplicateKey(request.request_id.clone()));
        }
        requests.insert(request.request_id.clone(), request.clone());
        Ok(())
    }

    async fn take_pending_request(
        &self,
        request_id: &str,
    ) -> Result<Option<PendingAuthorizationRequest>> {
        let mut requests = self.pending_requests.lock().map_err(lock_error)?;
        Ok(requests.remove(request_id))
    }
}

impl OAuthStorage for MemoryOAuthStorage {}
