use crate::handlers::{
    create_payment_url::__path_create_payment_url, health::__path_health_check,
    initiate_payment::__path_initiate_payment,
    loan_payment_callback::__path_loan_payment_callback, payment_status::__path_payment_status,
    pesapal_token::__path_pesapal_token, test_auth::__path_test_auth,
};
use loanhub_primitives::models::*;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LoanHub Kenya payments API",
        description = "PesaPal STK push initiation, status polling and callback redirects"
    ),
    paths(
        pesapal_token, create_payment_url, payment_status,
        initiate_payment, loan_payment_callback, test_auth, health_check
    ),
    components(schemas(
        ErrorResponse, TokenResponse, InitiatePaymentRequest, InitiatePaymentResponse,
        CreatePaymentUrlRequest, CreatePaymentUrlResponse, PaymentStatusResponse,
        TestAuthResponse, HealthStatus, PaymentMethod, PaymentState
    )),
    tags(
        (name = "PesaPal", description = "Gateway token, hosted payment page and status endpoints"),
        (name = "Payments", description = "Loan repayment initiation"),
        (name = "Callbacks", description = "Gateway callbacks redirected to the web front-end"),
        (name = "Diagnostics", description = "Gateway credential checks"),
        (name = "Health", description = "Service liveness")
    )
)]
pub struct ApiDoc;
