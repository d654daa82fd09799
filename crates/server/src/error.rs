//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every error renders as the
//! JSON envelope `{status, message}`; server-side failures are captured to
//! Sentry first and their details never reach the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::InvalidInput;
use crate::response::Envelope;
use crate::services::CheckoutError;

/// Client-facing `error` value for failed checkouts.
const CHECKOUT_FAILURE_DETAIL: &str = "The order could not be saved. Please try again.";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed. `message` is what the client sees.
    #[error("{message}")]
    Database {
        message: String,
        #[source]
        source: RepositoryError,
    },

    /// Checkout failed at validation or persistence.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unique constraint conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify a repository error.
    ///
    /// `failure` is the client message when the database itself failed.
    #[must_use]
    pub fn repository(failure: &str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("Resource not found".to_owned()),
            RepositoryError::Conflict(what) => Self::Conflict(what),
            RepositoryError::InvalidReference(_) => {
                Self::BadRequest("Referenced record does not exist".to_owned())
            }
            source @ (RepositoryError::Database(_) | RepositoryError::DataCorruption(_)) => {
                Self::Database {
                    message: failure.to_owned(),
                    source,
                }
            }
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Database { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Checkout(err) => match err {
                CheckoutError::InvalidRequest(_) | CheckoutError::EmptyCart => {
                    StatusCode::BAD_REQUEST
                }
                CheckoutError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Database { message, .. } => message.clone(),
            Self::Internal(_) => "Internal server error".to_owned(),
            Self::Checkout(err) => match err {
                CheckoutError::InvalidRequest(reason) => reason.to_string(),
                CheckoutError::EmptyCart => "Your cart is empty".to_owned(),
                CheckoutError::Persistence(_) => "Checkout failed".to_owned(),
            },
            Self::NotFound(message) | Self::BadRequest(message) | Self::Conflict(message) => {
                message.clone()
            }
        }
    }
}

/// Wrap repository results with the client message to use on failure.
pub trait RepositoryContext<T> {
    /// Map `Err` through [`AppError::repository`].
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`.
    fn context(self, failure: &str) -> Result<T>;

    /// Like [`context`](Self::context), reporting `NotFound` as `not_found`.
    ///
    /// # Errors
    ///
    /// Returns the classified `AppError`.
    fn context_or_not_found(self, failure: &str, not_found: &str) -> Result<T>;
}

impl<T> RepositoryContext<T> for std::result::Result<T, RepositoryError> {
    fn context(self, failure: &str) -> Result<T> {
        self.map_err(|err| AppError::repository(failure, err))
    }

    fn context_or_not_found(self, failure: &str, not_found: &str) -> Result<T> {
        self.map_err(|err| match err {
            RepositoryError::NotFound => AppError::NotFound(not_found.to_owned()),
            other => AppError::repository(failure, other),
        })
    }
}

impl From<InvalidInput> for AppError {
    fn from(err: InvalidInput) -> Self {
        Self::BadRequest(err.0.to_owned())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                source = ?std::error::Error::source(&self),
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let mut envelope = Envelope::<()>::message(status, self.client_message());
        if matches!(self, Self::Checkout(CheckoutError::Persistence(_))) {
            envelope = envelope.with_error(CHECKOUT_FAILURE_DETAIL);
        }

        (status, envelope).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
