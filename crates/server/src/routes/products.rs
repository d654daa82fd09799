//! Catalog route handlers.

use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use eco_friendly_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{RepositoryContext, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{Product, ProductInput};
use crate::response::{self, Envelope};
use crate::state::AppState;

const NOT_FOUND: &str = "Product not found";

/// `GET /products`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Envelope<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list()
        .await
        .context("Failed to fetch from products table")?;

    Ok(Envelope::data(products))
}

/// `POST /products`
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Envelope> {
    let product = input.validate()?;
    let product_id = ProductRepository::new(state.pool())
        .create(&product)
        .await
        .context("Error adding product")?;

    tracing::info!(%product_id, "Product created");
    Ok(Envelope::message(
        StatusCode::CREATED,
        "Product added successfully",
    ))
}

/// `PUT /products/{id}`
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Envelope> {
    let product = input.validate()?;
    ProductRepository::new(state.pool())
        .update(id, &product)
        .await
        .context_or_not_found("Error updating product", NOT_FOUND)?;

    Ok(response::ok("Product updated successfully"))
}

/// `DELETE /products/{id}`
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Envelope> {
    ProductRepository::new(state.pool())
        .delete(id)
        .await
        .context_or_not_found("Error deleting product", NOT_FOUND)?;

    Ok(response::ok("Product deleted successfully"))
}
