use axum::extract::{Json, State};
use loanhub_core::services::payment_service::{AppState, PaymentService};
use loanhub_primitives::error::ApiError;
use loanhub_primitives::models::dtos::payment_dto::{ErrorResponse, TestAuthResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/loan-payment/test-auth",
    responses(
        (status = 200, description = "Authenticated against PesaPal", body = TestAuthResponse),
        (status = 401, description = "PesaPal rejected the configured credentials", body = ErrorResponse)
    ),
    tag = "Diagnostics"
)]
pub async fn test_auth(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TestAuthResponse>, ApiError> {
    Ok(Json(PaymentService::test_authentication(&state).await?))
}
