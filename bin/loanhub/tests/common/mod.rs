#![allow(dead_code)]

use axum_test::TestServer;
use loanhub_core::app_state::AppState;
use loanhub_primitives::models::app_state::app_config::AppConfig;
use loanhub_primitives::models::app_state::pesapal_details::PesapalInfo;
use loanhub_primitives::models::enum_types::PesapalEnvironment;
use secrecy::SecretString;
use std::sync::Arc;
use wiremock::MockServer;

pub mod fixtures;

pub const SITE_BASE_URL: &str = "http://localhost:3000";
pub const TEST_IPN_ID: &str = "ipn-test-0001";

/// Configuration pointing the gateway client at `gateway_url`.
pub fn test_config(gateway_url: &str) -> AppConfig {
    AppConfig {
        site_base_url: SITE_BASE_URL.to_string(),
        pesapal_details: PesapalInfo {
            pesapal_consumer_key: "test_consumer_key".to_string(),
            pesapal_consumer_secret: SecretString::from("test_consumer_secret"),
            pesapal_environment: PesapalEnvironment::Sandbox,
            pesapal_api_url: gateway_url.to_string(),
            pesapal_ipn_id: Some(TEST_IPN_ID.to_string()),
            pesapal_pass_key: Some(SecretString::from("test_pass_key")),
            pesapal_short_code: Some("174379".to_string()),
            pesapal_currency: "KES".to_string(),
            pesapal_country_code: "KE".to_string(),
            pesapal_timeout_secs: 5,
        },
    }
}

pub fn create_test_app_state(gateway: &MockServer) -> Arc<AppState> {
    AppState::new(test_config(&gateway.uri())).expect("Failed to build test state")
}

pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    TestServer::new(loanhub_api::app::create_router(state)).expect("Failed to start test server")
}

/// Gateway mock plus a server routed to it.
pub async fn setup() -> (MockServer, TestServer) {
    let gateway = MockServer::start().await;
    let server = create_test_server(create_test_app_state(&gateway));
    (gateway, server)
}
