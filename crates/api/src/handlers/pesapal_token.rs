use axum::extract::{Json, State};
use loanhub_core::services::payment_service::{AppState, PaymentService};
use loanhub_primitives::error::ApiError;
use loanhub_primitives::models::dtos::payment_dto::{ErrorResponse, TokenResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/pesapal/token",
    responses(
        (status = 200, description = "Access token issued by PesaPal", body = TokenResponse),
        (status = 500, description = "Failed to obtain access token", body = ErrorResponse)
    ),
    tag = "PesaPal"
)]
pub async fn pesapal_token(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = PaymentService::get_access_token(&state).await?;

    Ok(Json(TokenResponse {
        success: true,
        token: token.token,
    }))
}
