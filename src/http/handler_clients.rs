//! Handles POST /clients/register and GET /clients/{client_id} - Client registry API

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
};
use serde_json::{Value, json};

use crate::{
    errors::ClientRegistrationError,
    http::context::AppState,
    oauth::types::{Client, ClientParams},
};

type ErrorResponse = (StatusCode, ResponseJson<Value>);

pub async fn register_client_handler(
    State(state): State<AppState>,
    Json(params): Json<ClientParams>,
) -> Result<(StatusCode, ResponseJson<Client>), ErrorResponse> {
    match state.client_registration_service.register_client(params).await {
        Ok(client) => Ok((StatusCode::CREATED, ResponseJson(client))),
        Err(e) => Err(error_response(&e)),
    }
}

pub async fn get_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<ResponseJson<Client>, ErrorResponse> {
    match state.client_registration_service.get_client(&client_id).await {
        Ok(Some(client)) => Ok(ResponseJson(client)),
        Ok(None) => Err(error_response(&ClientRegistrationError::ClientNotFound(
            client_id,
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

fn error_response(e: &ClientRegistrationError) -> ErrorResponse {
    let (status, error_code, description) = match e {
        ClientRegistrationError::InvalidClientParameters(_) => (
            StatusCode::BAD_REQUEST,
            "invalid_client_metadata",
            e.to_string(),
        ),
        ClientRegistrationError::ClientNotFound(_) => {
            (StatusCode::NOT_FOUND, "client_not_found", e.to_string())
        }
        ClientRegistrationError::StorageFailed(_) => {
            tracing::error!(error = ?e, "client registry failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server_error",
                "Internal server error".to_string(),
            )
        }
    };

    (
        status,
        ResponseJson(json!({
            "error": error_code,
            "error_description": description
        })),
    )
}
