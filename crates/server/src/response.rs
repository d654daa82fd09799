//! JSON response envelope.
//!
//! Every route answers with `{status, message?, data?}`, where `status`
//! repeats the HTTP status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl<T> Envelope<T> {
    /// A message-only envelope.
    #[must_use]
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    /// A 200 envelope carrying `data`.
    #[must_use]
    pub const fn data(data: T) -> Self {
        Self {
            status: 200,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub const fn with_error(mut self, error: &'static str) -> Self {
        self.error = Some(error);
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Shorthand for a 200 message envelope.
#[must_use]
pub fn ok(message: &str) -> Envelope {
    Envelope::message(StatusCode::OK, message)
}
