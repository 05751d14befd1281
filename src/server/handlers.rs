use crate::domain::{RegistrationRecord, RegistrationRequest, StoredRegistration};
use crate::server::AppState;
use crate::utils::error::PassError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    MissingFields,
    Store(PassError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE),
            ApiError::Store(e) => {
                tracing::error!("Failed to store registration: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store registration.",
                )
            }
        };
        let body = ErrorBody {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Both fields optional so absence and emptiness are rejected the same way.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterPayload {
    name: Option<String>,
    email: Option<String>,
}

impl RegisterPayload {
    fn into_request(self) -> Option<RegistrationRequest> {
        match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(RegistrationRequest { name, email })
            }
            _ => None,
        }
    }
}

pub(crate) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<Json<RegistrationRecord>, ApiError> {
    let payload = payload.map_err(|rejection| {
        tracing::debug!("Unreadable registration body: {}", rejection);
        ApiError::MissingFields
    })?;

    let request = payload.0.into_request().ok_or(ApiError::MissingFields)?;

    let record = RegistrationRecord::issue(request);
    state
        .store
        .insert(StoredRegistration::new(record.clone()))
        .await
        .map_err(ApiError::Store)?;

    tracing::info!(pass_id = %record.pass_id, "Issued pass");
    Ok(Json(record))
}

pub(crate) async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let registrations = state.store.len().await.map_err(ApiError::Store)?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "registrations": registrations,
    })))
}
