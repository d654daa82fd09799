//! Order admin route handlers.

use axum::extract::State;
use tracing::instrument;

use eco_friendly_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, RepositoryContext, Result};
use crate::extract::ApiPath;
use crate::models::{OrderLineDetail, OrderSummary};
use crate::response::Envelope;
use crate::state::AppState;

/// `GET /admin/orders`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Envelope<Vec<OrderSummary>>> {
    let orders = OrderRepository::new(state.pool())
        .list()
        .await
        .context("Failed to fetch orders")?;

    Ok(Envelope::data(orders))
}

/// `GET /admin/orders/{id}`
///
/// Lines whose product has since been deleted come back with empty product
/// fields.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Envelope<Vec<OrderLineDetail>>> {
    let repo = OrderRepository::new(state.pool());
    if !repo.exists(id).await.context("Failed to fetch order details")? {
        return Err(AppError::NotFound("Order not found".to_owned()));
    }

    let lines = repo
        .lines(id)
        .await
        .context("Failed to fetch order details")?;

    Ok(Envelope::data(lines))
}
