use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Body emitted when the envelope itself fails to encode, so a
/// serialization bug never produces an empty response.
const ENCODING_FALLBACK: &[u8] = br#"{"result":null,"error":"failed to encode response"}"#;

/// Uniform response body for every endpoint: exactly one of `result`
/// and `error` is non-null. Errors are signaled only through the
/// `error` field; the HTTP status is 200 on every path, success or
/// failure, so clients must inspect the body.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to encode response envelope: {}", e);
                ENCODING_FALLBACK.to_vec()
            }
        };
        ([(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}
