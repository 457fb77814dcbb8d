//! In-memory storage implementations
//!
//! This module provides in-memory implementations of all storage traits.
//! State lives as long as the storage value does.

mod oauth;

pub use oauth::MemoryOAuthStorage;
