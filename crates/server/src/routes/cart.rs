//! Cart route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use eco_friendly_core::{CartLineId, UserId};

use crate::db::{CartRepository, RepositoryError};
use crate::error::{AppError, RepositoryContext, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::{AddToCartInput, CartItem, InvalidInput, QuantityInput};
use crate::response::{self, Envelope};
use crate::state::AppState;

const NOT_FOUND: &str = "Cart item not found";

/// `GET /cart` query string.
#[derive(Debug, Default, Deserialize)]
pub struct CartQuery {
    pub user_id: Option<String>,
}

/// `POST /cart` success body.
#[derive(Debug, Serialize)]
pub struct CartLineAdded {
    pub status: u16,
    pub message: &'static str,
    pub cart_id: CartLineId,
}

/// `GET /cart?user_id=`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CartQuery>,
) -> Result<Envelope<Vec<CartItem>>> {
    let user_id = query
        .user_id
        .as_deref()
        .and_then(UserId::parse_positive)
        .ok_or(InvalidInput("user_id query parameter is required"))?;

    let items = CartRepository::new(state.pool())
        .list_for_user(user_id)
        .await
        .context("Error fetching cart items")?;

    Ok(Envelope::data(items))
}

/// `POST /cart`
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<AddToCartInput>,
) -> Result<impl IntoResponse> {
    let line = input.validate()?;
    let cart_id = CartRepository::new(state.pool())
        .add(&line)
        .await
        .map_err(|err| match err {
            RepositoryError::InvalidReference(_) => {
                AppError::BadRequest("Unknown product or user".to_owned())
            }
            other => AppError::repository("Error adding to cart", other),
        })?;

    tracing::info!(%cart_id, user_id = %line.user_id, "Cart line added");
    Ok((
        StatusCode::CREATED,
        Json(CartLineAdded {
            status: StatusCode::CREATED.as_u16(),
            message: "Product added to cart successfully",
            cart_id,
        }),
    ))
}

/// `PUT /cart/{id}`
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CartLineId>,
    ApiJson(input): ApiJson<QuantityInput>,
) -> Result<Envelope> {
    let quantity = input.validate()?;
    CartRepository::new(state.pool())
        .update_quantity(id, quantity)
        .await
        .context_or_not_found("Error updating cart item", NOT_FOUND)?;

    Ok(response::ok("Cart item updated successfully"))
}

/// `DELETE /cart/{id}`
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CartLineId>,
) -> Result<Envelope> {
    CartRepository::new(state.pool())
        .remove(id)
        .await
        .context_or_not_found("Error deleting cart item", NOT_FOUND)?;

    Ok(response::ok("Cart item deleted successfully"))
}
