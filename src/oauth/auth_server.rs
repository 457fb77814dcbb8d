//! Core authorization server: stages authorization requests and resolves consent decisions.
//!
//! Neither handler performs I/O of its own. Each returns a directive (a view to render
//! or a URL to redirect to) that the HTTP layer turns into a response.

use crate::errors::OAuthError;
use crate::oauth::{redirect::build_redirect_url, types::*};
use crate::storage::traits::OAuthStorage;
use serde::Serialize;
use std::sync::Arc;

/// Request-shape errors, rendered as an error view and never redirected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RequestError {
    #[error("Unknown client")]
    #[serde(rename = "Unknown client")]
    UnknownClient,
    #[error("Invalid redirect URI")]
    #[serde(rename = "Invalid redirect URI")]
    InvalidRedirectUri,
    #[error("No matching authorization request")]
    #[serde(rename = "No matching authorization request")]
    NoMatchingRequest,
}

/// Protocol-decision errors, reported to the client through its redirect URI
/// (RFC 6749 Section 4.1.2.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectErrorKind {
    AccessDenied,
    UnsupportedResponseType,
}

impl RedirectErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectErrorKind::AccessDenied => "access_denied",
            RedirectErrorKind::UnsupportedResponseType => "unsupported_response_type",
        }
    }
}

/// Payload of the `error` view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub error: RequestError,
}

/// Payload of the `approve` view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproveView {
    pub client: Client,
    pub reqid: String,
}

/// A view to render, identified by name and carrying its data payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewDirective {
    Error(ErrorView),
    Approve(ApproveView),
}

impl ViewDirective {
    pub fn error(error: RequestError) -> Self {
        ViewDirective::Error(ErrorView { error })
    }

    /// View name
    pub fn name(&self) -> &'static str {
        match self {
            ViewDirective::Error(_) => "error",
            ViewDirective::Approve(_) => "approve",
        }
    }

    /// Template file backing this view
    pub fn template(&self) -> String {
        format!("{}.html", self.name())
    }
}

/// Outcome of resolving a consent decision
#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalResponse {
    View(ViewDirective),
    Redirect(String),
}

/// OAuth 2.0 Authorization Server
pub struct AuthorizationServer {
    pub storage: Arc<dyn OAuthStorage>,
}

impl AuthorizationServer {
    /// Create a new authorization server
    pub fn new(storage: Arc<dyn OAuthStorage>) -> Self {
        Self { storage }
    }

    /// Handle authorization requests (RFC 6749 Section 4.1.1)
    ///
    /// Validates the client and redirect URI, then stages the request for consent.
    /// `Err` is reserved for storage failures.
    pub async fn authorize(&self, query: AuthorizeQuery) -> Result<ViewDirective, OAuthError> {
        let client = match self
            .storage
            .get_client(&query.client_id)
            .await
            .map_err(|e| OAuthError::ServerError(e.to_string()))?
        {
            Some(client) => client,
            None => {
                tracing::warn!(client_id = %query.client_id, "unknown client");
                return Ok(ViewDirective::error(RequestError::UnknownClient));
            }
        };

        // Exact string match against the registration, no normalization
        let redirect_uri = match query.redirect_uri {
            Some(redirect_uri) if client.redirect_uris.contains(&redirect_uri) => redirect_uri,
            redirect_uri => {
                tracing::warn!(
                    client_id = %client.client_id,
                    redirect_uri = ?redirect_uri,
                    "redirect URI not registered for client"
                );
                return Ok(ViewDirective::error(RequestError::InvalidRedirectUri));
            }
        };

        let pending = PendingAuthorizationRequest {
            request_id: generate_token(),
            client_id: client.client_id.clone(),
            response_type: query.response_type,
            redirect_uri,
            state: query.state,
        };

        self.storage
            .store_pending_request(&pending)
            .await
            .map_err(|e| {
                OAuthError::ServerError(format!("Failed to stage authorization request: {}", e))
            })?;

        tracing::debug!(
            client_id = %pending.client_id,
            request_id = %pending.request_id,
            "staged authorization request"
        );

        Ok(ViewDirective::Approve(ApproveView {
            client,
            reqid: pending.request_id,
        }))
    }

    /// Resolve the resource owner's decision on a staged request.
    ///
    /// The staged request is consumed whatever the outcome. Denial is checked before
    /// the response type, so a denied request never reports `unsupported_response_type`.
    pub async fn approve(&self, decision: ApprovalDecision) -> Result<ApprovalResponse, OAuthError> {
        let pending = match self
            .storage
            .take_pending_request(&decision.reqid)
            .await
            .map_err(|e| OAuthError::ServerError(e.to_string()))?
        {
            Some(pending) => pending,
            None => {
                tracing::warn!(request_id = %decision.reqid, "no matching authorization request");
                return Ok(ApprovalResponse::View(ViewDirective::error(
                    RequestError::NoMatchingRequest,
                )));
            }
        };

        if !decision.approve {
            tracing::info!(client_id = %pending.client_id, "access denied by resource owner");
            return error_redirect(&pending, RedirectErrorKind::AccessDenied);
        }

        if pending.response_type.as_deref() != Some(RESPONSE_TYPE_CODE) {
            tracing::info!(
                client_id = %pending.client_id,
                response_type = ?pending.response_type,
                "unsupported response type"
            );
            return error_redirect(&pending, RedirectErrorKind::UnsupportedResponseType);
        }

        let code = generate_token();
        let mut params = vec![("code", code.as_str())];
        if let Some(state) = pending.state.as_deref() {
            params.push(("state", state));
        }

        let url = redirect_url(&pending.redirect_uri, &params)?;
        tracing::info!(client_id = %pending.client_id, "issued authorization code");

        Ok(ApprovalResponse::Redirect(url))
    }
}

fn error_redirect(
    pending: &PendingAuthorizationRequest,
    kind: RedirectErrorKind,
) -> Result<ApprovalResponse, OAuthError> {
    redirect_url(&pending.redirect_uri, &[("error", kind.as_str())]).map(ApprovalResponse::Redirect)
}

fn redirect_url(redirect_uri: &str, params: &[(&str, &str)]) -> Result<String, OAuthError> {
    build_redirect_url(redirect_uri, params)
        .map_err(|e| OAuthError::InvalidRequest(format!("Invalid redirect URI: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::inmemory::MemoryOAuthStorage;
    use crate::storage::traits::{OAuthClientStore, PendingRequestStore};
    use std::collections::HashMap;
    use url::Url;

    const CALLBACK: &str = "https://example.com/callback";

    async fn create_test_server() -> (AuthorizationServer, Arc<MemoryOAuthStorage>, Client) {
        let storage = Arc::new(MemoryOAuthStorage::new());
        let client = Client {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uris: vec![
                CALLBACK.to_string(),
                "https://example.com/other?tenant=a".to_string(),
            ],
        };
        storage.store_client(&client).await.unwrap();

        (AuthorizationServer::new(storage.clone()), storage, client)
    }

    fn query(redirect_uri: &str, response_type: Option<&str>, state: Option<&str>) -> AuthorizeQuery {
        AuthorizeQuery {
            client_id: "test-client".to_string(),
            redirect_uri: Some(redirect_uri.to_string()),
            response_type: response_type.map(str::to_string),
            state: state.map(str::to_string),
        }
    }

    async fn stage(server: &AuthorizationServer, query: AuthorizeQuery) -> String {
        match server.authorize(query).await.unwrap() {
            ViewDirective::Approve(view) => view.reqid,
            other => panic!("Expected approve view, got {:?}", other),
        }
    }

    fn expect_redirect(response: ApprovalResponse) -> HashMap<String, String> {
        match response {
            ApprovalResponse::Redirect(url) => {
                Url::parse(&url).unwrap().query_pairs().into_owned().collect()
            }
            other => panic!("Expected redirect, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_client() {
        let (server, _, _) = create_test_server().await;

        let mut unknown = query(CALLBACK, Some("code"), None);
        unknown.client_id = "someone-else".to_string();

        let view = server.authorize(unknown).await.unwrap();
        assert_eq!(view.name(), "error");
        assert_eq!(view, ViewDirective::error(RequestError::UnknownClient));
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({"error": "Unknown client"})
        );
    }

    #[tokio::test]
    async fn test_invalid_redirect_uri() {
        let (server, _, _) = create_test_server().await;

        // Prefix, trailing slash and missing values all fail the exact match
        for redirect_uri in [
            Some("https://attacker.example/callback"),
            Some("https://example.com/callback/"),
            Some("https://example.com/other"),
            None,
        ] {
            let mut invalid = query(CALLBACK, Some("code"), None);
            invalid.redirect_uri = redirect_uri.map(str::to_string);

            let view = server.authorize(invalid).await.unwrap();
            assert_eq!(view, ViewDirective::error(RequestError::InvalidRedirectUri));
        }
    }

    #[tokio::test]
    async fn test_authorize_stages_request() {
        let (server, storage, client) = create_test_server().await;

        let view = server
            .authorize(query(CALLBACK, Some("code"), Some("foo")))
            .await
            .unwrap();
        assert_eq!(view.name(), "approve");
        assert_eq!(view.template(), "approve.html");

        let ViewDirective::Approve(approve) = view else {
            panic!("Expected approve view");
        };
        assert_eq!(approve.client, client);
        assert!(!approve.reqid.is_empty());

        let staged = storage
            .take_pending_request(&approve.reqid)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            staged,
            PendingAuthorizationRequest {
                request_id: approve.reqid.clone(),
                client_id: "test-client".to_string(),
                response_type: Some("code".to_string()),
                redirect_uri: CALLBACK.to_string(),
                state: Some("foo".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_authorize_generates_distinct_request_ids() {
        let (server, _, _) = create_test_server().await;

        let first = stage(&server, query(CALLBACK, Some("code"), None)).await;
        let second = stage(&server, query(CALLBACK, Some("code"), None)).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_approve_unknown_request() {
        let (server, _, _) = create_test_server().await;

        let response = server
            .approve(ApprovalDecision::new("missing", true))
            .await
            .unwrap();
        assert_eq!(
            response,
            ApprovalResponse::View(ViewDirective::error(RequestError::NoMatchingRequest))
        );
    }

    #[tokio::test]
    async fn test_deny() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("code"), Some("foo"))).await;

        let response = server
            .approve(ApprovalDecision::new(reqid, false))
            .await
            .unwrap();
        assert_eq!(
            response,
            ApprovalResponse::Redirect(format!("{}?error=access_denied", CALLBACK))
        );
    }

    #[tokio::test]
    async fn test_deny_checked_before_response_type() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("token"), None)).await;

        let params = expect_redirect(
            server
                .approve(ApprovalDecision::new(reqid, false))
                .await
                .unwrap(),
        );
        assert_eq!(params["error"], "access_denied");
    }

    #[tokio::test]
    async fn test_unsupported_response_type() {
        let (server, _, _) = create_test_server().await;

        for response_type in [Some("token"), Some("CODE"), Some(""), None] {
            let reqid = stage(&server, query(CALLBACK, response_type, Some("foo"))).await;

            let params = expect_redirect(
                server
                    .approve(ApprovalDecision::new(reqid, true))
                    .await
                    .unwrap(),
            );
            assert_eq!(params.len(), 1);
            assert_eq!(params["error"], "unsupported_response_type");
        }
    }

    #[tokio::test]
    async fn test_approve_issues_code_with_state() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("code"), Some("foo"))).await;

        let response = server
            .approve(ApprovalDecision::new(reqid, true))
            .await
            .unwrap();
        let ApprovalResponse::Redirect(url) = &response else {
            panic!("Expected redirect");
        };
        assert!(url.starts_with(CALLBACK));

        let params = expect_redirect(response);
        assert!(!params["code"].is_empty());
        assert_eq!(params["state"], "foo");
        assert_eq!(params.len(), 2);
    }

    #[tokio::test]
    async fn test_approve_without_state_omits_it() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("code"), None)).await;

        let params = expect_redirect(
            server
                .approve(ApprovalDecision::new(reqid, true))
                .await
                .unwrap(),
        );
        assert!(params.contains_key("code"));
        assert!(!params.contains_key("state"));
    }

    #[tokio::test]
    async fn test_approve_merges_existing_query() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(
            &server,
            query("https://example.com/other?tenant=a", Some("code"), Some("s")),
        )
        .await;

        let params = expect_redirect(
            server
                .approve(ApprovalDecision::new(reqid, true))
                .await
                .unwrap(),
        );
        assert_eq!(params["tenant"], "a");
        assert_eq!(params["state"], "s");
        assert!(params.contains_key("code"));
    }

    #[tokio::test]
    async fn test_request_resolves_at_most_once() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("code"), Some("foo"))).await;

        let first = server
            .approve(ApprovalDecision::new(reqid.clone(), true))
            .await
            .unwrap();
        assert!(matches!(first, ApprovalResponse::Redirect(_)));

        for approve in [true, false] {
            let again = server
                .approve(ApprovalDecision::new(reqid.clone(), approve))
                .await
                .unwrap();
            assert_eq!(
                again,
                ApprovalResponse::View(ViewDirective::error(RequestError::NoMatchingRequest))
            );
        }
    }

    #[tokio::test]
    async fn test_denied_request_is_consumed() {
        let (server, _, _) = create_test_server().await;
        let reqid = stage(&server, query(CALLBACK, Some("code"), None)).await;

        server
            .approve(ApprovalDecision::new(reqid.clone(), false))
            .await
            .unwrap();
        let again = server
            .approve(ApprovalDecision::new(reqid, true))
            .await
            .unwrap();
        assert!(matches!(again, ApprovalResponse::View(_)));
    }

    // Registration rejects such URIs; only a client written straight to storage has one.
    #[tokio::test]
    async fn test_unparseable_stored_redirect_uri_is_an_error() {
        let storage = Arc::new(MemoryOAuthStorage::new());
        storage
            .store_client(&Client {
                client_id: "relative".to_string(),
                client_secret: "secret".to_string(),
                redirect_uris: vec!["/callback".to_string()],
            })
            .await
            .unwrap();
        let server = AuthorizationServer::new(storage);

        let reqid = stage(
            &server,
            AuthorizeQuery {
                client_id: "relative".to_string(),
                redirect_uri: Some("/callback".to_string()),
                response_type: Some("code".to_string()),
                state: None,
            },
        )
        .await;

        let result = server.approve(ApprovalDecision::new(reqid, true)).await;
        assert!(matches!(result, Err(OAuthError::InvalidRequest(_))));
    }
}
