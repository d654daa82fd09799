//! HTTP route handlers for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness
//! GET    /health/ready           - Readiness (database ping)
//!
//! # Catalog
//! GET    /products               - List products
//! POST   /products               - Create product
//! PUT    /products/{id}          - Update product
//! DELETE /products/{id}          - Delete product
//!
//! # Cart
//! GET    /cart?user_id=          - List a buyer's cart
//! POST   /cart                   - Add a cart line
//! PUT    /cart/{id}              - Change quantity
//! DELETE /cart/{id}              - Remove a cart line
//!
//! # Checkout
//! POST   /checkout               - Turn the cart into an order
//!
//! # Contact
//! POST   /contactus              - Submit a contact message
//! GET    /contacts               - List contact messages
//!
//! # Users
//! GET    /admin/users            - List users
//! PUT    /admin/users/{id}       - Update user
//! DELETE /admin/users/{id}       - Delete user
//! GET    /user/profile/{id}      - Get profile
//! PUT    /user/profile/{id}      - Update profile
//!
//! # Orders
//! GET    /admin/orders           - List orders
//! GET    /admin/orders/{id}      - Order lines
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware::from_fn,
    routing::{get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::middleware::{request_id_middleware, request_span, security_headers_middleware};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::index).post(cart::add))
        .route("/{id}", put(cart::update).delete(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::index))
        .route("/users/{id}", put(users::update).delete(users::delete))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/contactus", post(contact::submit))
        .route("/contacts", get(contact::index))
        .route(
            "/user/profile/{id}",
            get(users::profile).put(users::update_profile),
        )
        .nest("/admin", admin_routes())
}

/// Build the complete application: routes, middleware and state.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    routes()
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = match config.cors_origin.as_deref() {
        None => AllowOrigin::any(),
        Some(raw) => match HeaderValue::from_str(raw) {
            Ok(value) => AllowOrigin::exact(value),
            Err(err) => {
                tracing::warn!(origin = raw, error = %err, "Invalid CORS origin, denying cross-origin requests");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
