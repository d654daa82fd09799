//! Domain types for the shop.
//!
//! Type-safe wrappers for IDs, emails, quantities, shipping addresses and
//! money arithmetic.

pub mod address;
pub mod email;
pub mod id;
pub mod money;
pub mod quantity;

pub use address::{DEFAULT_COUNTRY, IncompleteAddress, ShippingAddress, ShippingAddressInput};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{line_total, order_total};
pub use quantity::{Quantity, QuantityError};
