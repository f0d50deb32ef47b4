use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use std::fmt;

/// Failures talking to the PesaPal gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PesapalError {
    /// Transport fault or an undecodable response body.
    RequestFailed(String),
    Authentication(String),
    /// The gateway answered with an error object or a non-200 status.
    Rejected(String),
    InvalidResponse(String),
}

impl fmt::Display for PesapalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PesapalError::RequestFailed(e) => write!(f, "PesaPal request failed: {}", e),
            PesapalError::Authentication(e) => write!(f, "PesaPal authentication failed: {}", e),
            PesapalError::Rejected(e) => write!(f, "PesaPal rejected the request: {}", e),
            PesapalError::InvalidResponse(e) => write!(f, "Invalid PesaPal response: {}", e),
        }
    }
}

impl std::error::Error for PesapalError {}

impl From<reqwest::Error> for PesapalError {
    fn from(err: reqwest::Error) -> Self {
        PesapalError::RequestFailed(err.to_string())
    }
}

pub const TOKEN_FAILURE_MESSAGE: &str = "Failed to obtain access token";
pub const GATEWAY_FAILURE_MESSAGE: &str = "Payment gateway request failed";

#[derive(Debug)]
pub enum ApiError {
    Validation(validator::ValidationErrors),
    BadRequest(String),
    Declined(String),
    Auth(String),
    Gateway(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::Declined(e) => write!(f, "Payment declined: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Gateway(e) => write!(f, "Payment gateway error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<PesapalError> for ApiError {
    fn from(err: PesapalError) -> Self {
        match err {
            PesapalError::Authentication(_) => ApiError::Gateway(TOKEN_FAILURE_MESSAGE.into()),
            PesapalError::Rejected(msg) => ApiError::Declined(msg),
            PesapalError::RequestFailed(_) | PesapalError::InvalidResponse(_) => {
                ApiError::Gateway(GATEWAY_FAILURE_MESSAGE.into())
            }
        }
    }
}

/// Joins field messages into one line, ordered by field name.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field, message)
        })
        .collect();

    fields.sort();

    if fields.is_empty() {
        return "Invalid request".to_string();
    }

    fields
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, validation_message(&errors)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Declined(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Gateway(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = self.into();
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn rejected_order_keeps_gateway_message() {
        let err: ApiError = PesapalError::Rejected("insufficient funds".into()).into();
        let (status, msg): (StatusCode, String) = err.into();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "insufficient funds");
    }

    #[test]
    fn transport_detail_is_not_exposed() {
        let err: ApiError =
            PesapalError::RequestFailed("connection refused (os error 111)".into()).into();
        let (status, msg): (StatusCode, String) = err.into();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, GATEWAY_FAILURE_MESSAGE);
    }

    #[test]
    fn validation_messages_are_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "phone_number",
            ValidationError::new("required").with_message("Phone number is required".into()),
        );
        errors.add(
            "amount",
            ValidationError::new("required").with_message("Amount is required".into()),
        );

        assert_eq!(
            validation_message(&errors),
            "Amount is required; Phone number is required"
        );
    }
}
