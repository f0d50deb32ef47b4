use serde_json::{json, Value};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "TEST_ACCESS_TOKEN";

pub fn token_body() -> Value {
    json!({
        "token": TOKEN,
        "expiryDate": "2026-10-19T12:05:00.000Z",
        "error": null,
        "status": "200",
        "message": "Request processed successfully"
    })
}

pub fn rejected_credentials_body() -> Value {
    json!({
        "token": null,
        "expiryDate": null,
        "error": {
            "error_type": "api_error",
            "code": "invalid_consumer_key_or_secret_provided",
            "message": ""
        },
        "status": "500",
        "message": null
    })
}

pub fn order_body(order_tracking_id: &str, merchant_reference: &str, redirect_url: &str) -> Value {
    json!({
        "order_tracking_id": order_tracking_id,
        "merchant_reference": merchant_reference,
        "redirect_url": redirect_url,
        "error": null,
        "status": "200"
    })
}

pub fn declined_order_body(message: &str) -> Value {
    json!({
        "order_tracking_id": null,
        "merchant_reference": null,
        "redirect_url": null,
        "error": {
            "error_type": "api_error",
            "code": "payment_declined",
            "message": message
        },
        "status": "500"
    })
}

pub fn status_body(description: &str, status_code: i64) -> Value {
    json!({
        "payment_method": "MpesaKE",
        "amount": 1500.0,
        "created_date": "2026-10-19T11:59:02.123",
        "confirmation_code": "SJK8Q1XYZ2",
        "payment_status_description": description,
        "description": null,
        "message": "Request processed successfully",
        "payment_account": "2547******78",
        "call_back_url": "http://localhost:3000/api/loan-payment/callback",
        "status_code": status_code,
        "merchant_reference": "PAY-1",
        "currency": "KES",
        "error": { "error_type": null, "code": null, "message": null },
        "status": "200"
    })
}

pub async fn mount_token(gateway: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/Auth/RequestToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(gateway)
        .await;
}

/// Fails the test on drop if the gateway receives any request.
pub async fn expect_no_gateway_calls(gateway: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(gateway)
        .await;
}
