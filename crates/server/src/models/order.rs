//! Order types written by checkout and read by the admin views.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use eco_friendly_core::{OrderId, OrderLineId, ProductId, ShippingAddress, UserId};

/// Order row to insert. `order_date` is the database's current date.
#[derive(Debug, Clone, Copy)]
pub struct NewOrder<'a> {
    pub user_id: UserId,
    pub total_cost: Decimal,
    pub shipping_address: &'a ShippingAddress,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub total_cost: Decimal,
    /// Number of order lines written (one per cart line).
    pub line_count: usize,
}

/// Order list row for the admin view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub order_date: NaiveDate,
    pub total_cost: Decimal,
    pub ship_full_name: String,
    pub ship_town: String,
    pub ship_country: String,
    pub created_at: DateTime<Utc>,
}

/// One order line joined with its product, if the product still exists.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLineDetail {
    pub order_details_id: OrderLineId,
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub product_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
