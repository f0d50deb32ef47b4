use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use loanhub_primitives::error::ApiError;
use tracing::warn;

/// Unwraps a JSON body, turning axum's rejection into a 400 `ApiError`.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    result.map(|Json(v)| v).map_err(|err| {
        warn!(error = %err.body_text(), "Rejected request body");
        ApiError::BadRequest(err.body_text())
    })
}

pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    result.map(|Query(v)| v).map_err(|err| {
        warn!(error = %err.body_text(), "Rejected query string");
        ApiError::BadRequest(err.body_text())
    })
}
