//! OAuth client registry.
//!
//! Validates registration input and keeps registered clients available for lookup.

pub mod registration;

// Re-export main types and services
pub use registration::{ClientRegistrationService, create_client};
