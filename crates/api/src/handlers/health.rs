use axum::{http::StatusCode, Json};
use loanhub_primitives::models::dtos::payment_dto::HealthStatus;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    summary = "Health check endpoint",
    description = "Returns 200 OK while the service can accept requests. \
                   Does not call the payment gateway; use /api/loan-payment/test-auth for that.",
    operation_id = "healthCheck",
    responses(
        (status = 200, description = "Service is healthy and operational", body = HealthStatus),
    ),
    security(()),
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: StatusCode::OK.to_string(),
        message: "API is healthy".to_string(),
    })
}
