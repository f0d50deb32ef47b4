use crate::extractors::extract_query;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use loanhub_core::services::payment_service::{AppState, PaymentService};
use loanhub_primitives::error::ApiError;
use loanhub_primitives::models::dtos::payment_dto::{
    ErrorResponse, PaymentStatusQuery, PaymentStatusResponse,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/pesapal/payment-status",
    params(PaymentStatusQuery),
    responses(
        (status = 200, description = "Current status as reported by PesaPal", body = PaymentStatusResponse),
        (status = 400, description = "Malformed query, missing orderTrackingId or rejected by PesaPal", body = ErrorResponse),
        (status = 500, description = "Payment gateway unavailable", body = ErrorResponse)
    ),
    tag = "PesaPal"
)]
pub async fn payment_status(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PaymentStatusQuery>, QueryRejection>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let query = extract_query(query)?;
    let status =
        PaymentService::check_payment_status(&state, query.order_tracking_id.as_deref()).await?;

    Ok(Json(status))
}
