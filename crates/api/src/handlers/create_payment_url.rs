use crate::extractors::extract_json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use loanhub_core::services::payment_service::{AppState, PaymentService};
use loanhub_primitives::error::ApiError;
use loanhub_primitives::models::dtos::payment_dto::{
    CreatePaymentUrlRequest, CreatePaymentUrlResponse, ErrorResponse, SubmissionOutcome,
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/pesapal/create-payment-url",
    request_body = CreatePaymentUrlRequest,
    responses(
        (status = 200, description = "Order submitted, hosted payment page URL returned", body = CreatePaymentUrlResponse),
        (status = 400, description = "Malformed body, invalid order data or order declined by PesaPal", body = ErrorResponse),
        (status = 500, description = "Payment gateway unavailable", body = ErrorResponse)
    ),
    tag = "PesaPal"
)]
pub async fn create_payment_url(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePaymentUrlRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentUrlResponse>, ApiError> {
    let req = extract_json(body)?;

    match PaymentService::create_payment_url(&state, req).await? {
        SubmissionOutcome::Submitted(order) => Ok(Json(CreatePaymentUrlResponse {
            success: true,
            order_tracking_id: order.order_tracking_id,
            merchant_reference: order.merchant_reference,
            redirect_url: order.redirect_url,
        })),
        SubmissionOutcome::Declined { error } => Err(ApiError::Declined(error)),
    }
}
