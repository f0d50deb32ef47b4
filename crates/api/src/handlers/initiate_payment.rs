use crate::extractors::extract_json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use loanhub_core::services::payment_service::{AppState, PaymentService};
use loanhub_primitives::error::ApiError;
use loanhub_primitives::models::dtos::payment_dto::{
    ErrorResponse, InitiatePaymentRequest, InitiatePaymentResponse, SubmissionOutcome,
};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/payment/initiate",
    request_body = InitiatePaymentRequest,
    responses(
        (status = 200, description = "STK push initiated", body = InitiatePaymentResponse),
        (status = 400, description = "Malformed body, missing or invalid field, or payment declined", body = ErrorResponse),
        (status = 500, description = "Payment gateway unavailable", body = ErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InitiatePaymentRequest>, JsonRejection>,
) -> Result<Json<InitiatePaymentResponse>, ApiError> {
    let req = extract_json(body)?;

    match PaymentService::initiate_stk_push(&state, req).await? {
        SubmissionOutcome::Submitted(order) => {
            info!(
                order_tracking_id = %order.order_tracking_id,
                "Payment initiated"
            );

            Ok(Json(InitiatePaymentResponse {
                success: true,
                payment_id: order.merchant_reference,
                order_tracking_id: order.order_tracking_id,
                payment_url: order.redirect_url,
                message: "Payment initiated. Complete the prompt on your phone.".to_string(),
            }))
        }
        SubmissionOutcome::Declined { error } => Err(ApiError::Declined(error)),
    }
}
