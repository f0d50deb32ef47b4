use axum::extract::{RawQuery, State};
use axum::response::Redirect;
use loanhub_core::services::callback_service::CallbackService;
use loanhub_core::AppState;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/loan-payment/callback",
    params(
        ("OrderTrackingId" = Option<String>, Query, description = "Tracking id issued by PesaPal"),
        ("OrderMerchantReference" = Option<String>, Query, description = "Merchant reference sent with the order"),
        ("OrderNotificationType" = Option<String>, Query, description = "IPN notification type")
    ),
    responses(
        (status = 307, description = "Redirect to /loan-payment/success or /loan-payment/error")
    ),
    security(()),
    tag = "Callbacks"
)]
pub async fn loan_payment_callback(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Redirect {
    let outcome = CallbackService::resolve(query.as_deref());

    Redirect::temporary(&outcome.redirect_url(&state.config.site_base_url))
}
