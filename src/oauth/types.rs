//! OAuth 2.0 authorization code grant types and data structures.
//!
//! Defines the registered client, the staged authorization request, the inbound
//! authorization query and approval decision, and the identifier generators.

use base64::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The only response type this server issues codes for
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Registered OAuth client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier
    pub client_id: String,
    /// Client secret, never verified by this server
    pub client_secret: String,
    /// Registered redirect URIs, in registration order
    pub redirect_uris: Vec<String>,
}

/// Client registration parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientParams {
    /// Redirect URIs; must be present and non-empty
    pub redirect_uris: Option<Vec<String>>,
}

impl ClientParams {
    pub fn with_redirect_uris<I, S>(redirect_uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            redirect_uris: Some(redirect_uris.into_iter().map(Into::into).collect()),
        }
    }
}

/// Inbound authorization query (RFC 6749 Section 4.1.1)
///
/// Every field is optional on the wire; validation happens in the authorization
/// server so that malformed queries still resolve to an error view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizeQuery {
    #[serde(default)]
    pub client_id: String,
    pub redirect_uri: Option<String>,
    pub response_type: Option<String>,
    pub state: Option<String>,
}

/// Authorization request staged until the resource owner decides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorizationRequest {
    /// Opaque identifier handed to the consent form
    pub request_id: String,
    pub client_id: String,
    /// Response type exactly as received; `None` when the query omitted it
    pub response_type: Option<String>,
    /// Redirect URI, already checked against the client's registration
    pub redirect_uri: String,
    /// Opaque state echoed back on success
    pub state: Option<String>,
}

/// Resource owner decision on a staged request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalDecision {
    #[serde(default)]
    pub reqid: String,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub approve: bool,
}

impl ApprovalDecision {
    pub fn new(reqid: impl Into<String>, approve: bool) -> Self {
        Self {
            reqid: reqid.into(),
            approve,
        }
    }
}

/// Form submit buttons send their label, so any non-empty value other than an explicit
/// negative counts as approval.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.is_some_and(|value| is_truthy(&value)))
}

pub(crate) fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !matches!(
            value.to_lowercase().as_str(),
            "false" | "0" | "off" | "no"
        )
}

/// Generate a secure random token
pub fn generate_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.r#gen();
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a client ID
pub fn generate_client_id() -> String {
    Uuid::new_v4().to_string()
}
