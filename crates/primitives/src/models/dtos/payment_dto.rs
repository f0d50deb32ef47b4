use crate::models::enum_types::{PaymentMethod, PaymentState};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// --- Envelopes ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

// --- Token ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

// --- STK Push initiation ---

/// Fields are optional on the wire so that missing values reach validation
/// and come back as 400 rather than a body rejection.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    #[validate(length(max = 50, message = "Payment id must be at most 50 characters"))]
    pub payment_id: Option<String>,
    pub order_tracking_id: Option<String>,
    #[validate(
        required(message = "Amount is required"),
        range(exclusive_min = 0.0, message = "Amount must be greater than zero")
    )]
    pub amount: Option<f64>,
    #[validate(
        required(message = "Phone number is required"),
        length(min = 1, message = "Phone number is required")
    )]
    pub phone_number: Option<String>,
    #[validate(
        required(message = "Payment method is required"),
        length(min = 1, message = "Payment method is required")
    )]
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub loan_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentResponse {
    pub success: bool,
    pub payment_id: String,
    pub order_tracking_id: String,
    pub payment_url: String,
    pub message: String,
}

/// A validated STK Push request, ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct StkPushRequest {
    pub merchant_reference: String,
    pub amount: f64,
    pub phone_number: String,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub loan_id: Option<String>,
    pub user_id: Option<String>,
}

// --- Hosted payment page ---

#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentUrlRequest {
    #[validate(length(max = 50, message = "Order id must be at most 50 characters"))]
    pub id: Option<String>,
    #[validate(
        required(message = "Amount is required"),
        range(exclusive_min = 0.0, message = "Amount must be greater than zero")
    )]
    pub amount: Option<f64>,
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,
    #[validate(length(max = 100, message = "Description must be at most 100 characters"))]
    pub description: Option<String>,
    pub phone_number: Option<String>,
    #[validate(email(message = "Email address is invalid"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(url(message = "Callback URL is invalid"))]
    pub callback_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentUrlResponse {
    pub success: bool,
    pub order_tracking_id: String,
    pub merchant_reference: String,
    pub redirect_url: String,
}

/// Result of submitting an order to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Submitted(SubmittedOrder),
    Declined { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOrder {
    pub order_tracking_id: String,
    pub merchant_reference: String,
    pub redirect_url: String,
}

// --- Status polling ---

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaymentStatusQuery {
    /// Tracking id returned when the order was submitted.
    pub order_tracking_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub success: bool,
    pub order_tracking_id: String,
    /// Gateway's status description, verbatim.
    pub status: String,
    pub state: PaymentState,
    pub status_code: Option<i64>,
    pub payment_method: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub confirmation_code: Option<String>,
    pub merchant_reference: Option<String>,
}

// --- Diagnostics ---

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestAuthResponse {
    pub success: bool,
    pub message: String,
    pub service: String,
    pub environment: String,
    pub base_url: String,
    pub token_issued: bool,
    pub token_expiry: Option<String>,
    pub short_code: Option<String>,
    pub pass_key_configured: bool,
}

/// Token plus the expiry the gateway reported alongside it.
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expiry_date: Option<String>,
}
