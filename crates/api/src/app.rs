use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    create_payment_url::create_payment_url, health::health_check,
    initiate_payment::initiate_payment, loan_payment_callback::loan_payment_callback,
    payment_status::payment_status, pesapal_token::pesapal_token, test_auth::test_auth,
};
use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use loanhub_core::AppState;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(create_pesapal_routers())
        .merge(create_loan_payment_routers())
        .route("/api/health", get(health_check))
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(middleware::from_fn(https_redirect_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

fn create_pesapal_routers() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/pesapal/token", get(pesapal_token))
        .route("/api/pesapal/create-payment-url", post(create_payment_url))
        .route("/api/pesapal/payment-status", get(payment_status))
}

fn create_loan_payment_routers() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/payment/initiate", post(initiate_payment))
        .route("/api/loan-payment/callback", get(loan_payment_callback))
        .route("/api/loan-payment/test-auth", get(test_auth))
}

async fn https_redirect_middleware(
    req: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        let headers = req.headers();
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|h| h.to_str().ok());

        if let Some("http") = proto {
            let host = headers
                .get("host")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("localhost");

            let path_and_query = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("");
            let redirect_url = format!("https://{}{}", host, path_and_query);

            return axum::response::Redirect::permanent(&redirect_url).into_response();
        }
    }

    next.run(req).await
}
