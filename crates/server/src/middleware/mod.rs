//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span carrying `request_id`)
//! 3. Request ID (reuse or generate, echo in response)
//! 4. CORS
//! 5. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware, request_span};
pub use security_headers::security_headers_middleware;
