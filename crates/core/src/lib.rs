//! Eco Friendly Core - shared domain types.
//!
//! Used by:
//! - `server` - the HTTP backend (catalog, cart, checkout, admin)
//! - `cli` - migrations and demo data seeding
//! - `integration-tests` - the in-memory checkout store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access. The optional `postgres` feature adds `sqlx` type
//! mappings for the newtypes.
//!
//! # Modules
//!
//! - [`types`] - typed IDs, email, quantity, shipping address, totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

// Re-exported so downstream crates agree on the decimal type.
pub use rust_decimal::Decimal;
