//! Business logic services.
//!
//! Most routes are a single repository call and need no service. Checkout
//! spans several statements in one transaction, so it gets an orchestrator
//! here.

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService, InvalidCheckout};
