use crate::domain::error::PayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// HTTP face of a `PayError`.
pub struct ApiError(pub PayError);

impl From<PayError> for ApiError {
    fn from(err: PayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            PayError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            PayError::InterfaceFailure => (StatusCode::BAD_GATEWAY, "interface_failure"),
            PayError::GatewayRejected(_) => (StatusCode::PAYMENT_REQUIRED, "gateway_rejected"),
            PayError::OrderFailed(_) => (StatusCode::PAYMENT_REQUIRED, "order_failed"),
            PayError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "pay_timeout"),
            PayError::CancelFailure => (StatusCode::INTERNAL_SERVER_ERROR, "cancel_failure"),
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": self.0.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
