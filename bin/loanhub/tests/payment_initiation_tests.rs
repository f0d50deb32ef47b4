mod common;

use common::fixtures::{
    declined_order_body, expect_no_gateway_calls, mount_token, order_body, TOKEN,
};
use common::{create_test_server, setup, test_config, SITE_BASE_URL, TEST_IPN_ID};
use http::StatusCode;
use loanhub_core::app_state::AppState;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn initiate_body() -> Value {
    json!({
        "paymentId": "PAY-1",
        "amount": 1500,
        "phoneNumber": "0712345678",
        "paymentMethod": "mpesa",
        "description": "Loan repayment",
        "loanId": "LN-42",
        "userId": "user-7"
    })
}

#[tokio::test]
async fn test_initiate_payment_success() {
    let (gateway, server) = setup().await;
    mount_token(&gateway).await;

    Mock::given(method("POST"))
        .and(path("/api/Transactions/SubmitOrderRequest"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_partial_json(json!({
            "id": "PAY-1",
            "currency": "KES",
            "amount": 1500.0,
            "callback_url": format!("{}/api/loan-payment/callback", SITE_BASE_URL),
            "notification_id": TEST_IPN_ID,
            "billing_address": { "phone_number": "254712345678", "country_code": "KE" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body(
            "OT123",
            "PAY-1",
            "https://pay.example/123",
        )))
        .expect(1)
        .mount(&gateway)
        .await;

    let response = server.post("/api/payment/initiate").json(&initiate_body()).await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["paymentId"], "PAY-1");
    assert_eq!(body["orderTrackingId"], "OT123");
    assert_eq!(body["paymentUrl"], "https://pay.example/123");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_initiate_payment_declined_by_gateway() {
    let (gateway, server) = setup().await;
    mount_token(&gateway).await;

    Mock::given(method("POST"))
        .and(path("/api/Transactions/SubmitOrderRequest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(declined_order_body("insufficient funds")),
        )
        .mount(&gateway)
        .await;

    let response = server.post("/api/payment/initiate").json(&initiate_body()).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "success": false, "error": "insufficient funds" }));
}

#[tokio::test]
async fn test_missing_required_fields_make_no_gateway_call() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    for field in ["amount", "phoneNumber", "paymentMethod"] {
        let mut body = initiate_body();
        body.as_object_mut().unwrap().remove(field);

        let response = server.post("/api/payment/initiate").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false, "{field}");
        assert!(!body["error"].as_str().unwrap().is_empty(), "{field}");
    }
}

#[tokio::test]
async fn test_all_fields_missing_lists_each_message() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    let response = server.post("/api/payment/initiate").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Amount is required; Payment method is required; Phone number is required"
    );
}

#[tokio::test]
async fn test_invalid_phone_and_method_are_rejected_locally() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    let mut body = initiate_body();
    body["phoneNumber"] = json!("12345");
    let response = server.post("/api/payment/initiate").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "success": false, "error": "Invalid phone number" }));

    let mut body = initiate_body();
    body["paymentMethod"] = json!("paypal");
    let response = server.post("/api/payment/initiate").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Unsupported payment method"));

    let mut body = initiate_body();
    body["amount"] = json!(-10);
    let response = server.post("/api/payment/initiate").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_failure_is_a_generic_server_error() {
    let (gateway, server) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/Auth/RequestToken"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&gateway)
        .await;

    Mock::given(path("/api/Transactions/SubmitOrderRequest"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gateway)
        .await;

    let response = server.post("/api/payment/initiate").json(&initiate_body()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "success": false, "error": "Failed to obtain access token" }));
}

#[tokio::test]
async fn test_gateway_outage_hides_upstream_detail() {
    let (gateway, server) = setup().await;
    mount_token(&gateway).await;

    Mock::given(method("POST"))
        .and(path("/api/Transactions/SubmitOrderRequest"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&gateway)
        .await;

    let response = server.post("/api/payment/initiate").json(&initiate_body()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "success": false, "error": "Payment gateway request failed" }));
}

#[tokio::test]
async fn test_ipn_registered_on_demand_once_and_reused() {
    let gateway = MockServer::start().await;
    let mut config = test_config(&gateway.uri());
    config.pesapal_details.pesapal_ipn_id = None;
    let server = create_test_server(AppState::new(config).unwrap());

    mount_token(&gateway).await;

    Mock::given(method("POST"))
        .and(path("/api/URLSetup/RegisterIPN"))
        .and(body_json(json!({
            "url": format!("{}/api/loan-payment/callback", SITE_BASE_URL),
            "ipn_notification_type": "GET"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{}/api/loan-payment/callback", SITE_BASE_URL),
            "created_date": "2026-10-19T10:00:00.000Z",
            "ipn_id": "ipn-fresh-42",
            "error": null,
            "status": "200"
        })))
        .expect(1)
        .mount(&gateway)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/Transactions/SubmitOrderRequest"))
        .and(body_partial_json(json!({ "notification_id": "ipn-fresh-42" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_body(
            "OT777",
            "PAY-1",
            "https://pay.example/777",
        )))
        .expect(2)
        .mount(&gateway)
        .await;

    for _ in 0..2 {
        let response = server.post("/api/payment/initiate").json(&initiate_body()).await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["orderTrackingId"], "OT777");
    }
}

#[tokio::test]
async fn test_wrongly_typed_body_gets_json_error() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    let mut body = initiate_body();
    body["amount"] = json!("1500");

    let response = server.post("/api/payment/initiate").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_malformed_json_gets_json_error() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    let response = server
        .post("/api/payment/initiate")
        .text("{\"amount\": 1500,")
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_overlong_payment_id_is_rejected_locally() {
    let (gateway, server) = setup().await;
    expect_no_gateway_calls(&gateway).await;

    let mut body = initiate_body();
    body["paymentId"] = json!("P".repeat(51));

    let response = server.post("/api/payment/initiate").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "success": false,
        "error": "Payment id must be at most 50 characters"
    }));
}
