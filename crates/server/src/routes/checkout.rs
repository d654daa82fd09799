//! Checkout route handler.
//!
//! All of the work happens in [`CheckoutService`](crate::services::CheckoutService);
//! this only shapes the response.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use eco_friendly_core::OrderId;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::services::CheckoutRequest;
use crate::state::AppState;

/// `POST /checkout` success body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: u16,
    pub message: &'static str,
    pub order_id: OrderId,
    pub total_cost: Decimal,
}

/// `POST /checkout`
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let receipt = state.checkout().checkout(request).await?;

    Ok(Json(CheckoutResponse {
        status: 200,
        message: "Checkout successful",
        order_id: receipt.order_id,
        total_cost: receipt.total_cost,
    }))
}
