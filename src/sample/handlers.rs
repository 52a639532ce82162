use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Body returned when a handler cannot serialize its own response.
pub const SERIALIZATION_FAILURE: &str = "Oops, something went wrong.";

#[derive(Debug, Serialize, Deserialize)]
pub struct SampleResponse {
    pub greeting: String,
}

/// `GET /v1/hello`
pub async fn hello() -> Response {
    json_response(&SampleResponse {
        greeting: "Hello World".to_string(),
    })
}

/// Serialize `value` as a JSON 200, or fall back to a generic 500.
pub fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                SERIALIZATION_FAILURE,
            )
                .into_response()
        }
    }
}
