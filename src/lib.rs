//! Authorization code server library crate.
//!
//! A minimal OAuth 2.0 authorization server for the authorization code grant: a client
//! registry, a store of authorization requests awaiting consent, and the handlers that
//! stage requests and resolve the resource owner's decision into a redirect.

pub mod config;
pub mod errors;
pub mod http;
pub mod oauth;
pub mod storage;
pub mod templates;
