//! Eco Friendly shop HTTP backend.
//!
//! Catalog, cart, contact form, user and order administration, and a
//! transactional checkout that turns a buyer's cart into an order. Served
//! as a library so integration tests can drive the router and the checkout
//! service directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
