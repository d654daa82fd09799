//! User admin and profile route handlers.
//!
//! Admin and profile updates share one partial-update path; only the
//! response messages differ.

use axum::extract::State;
use tracing::instrument;

use eco_friendly_core::UserId;

use crate::db::UserRepository;
use crate::error::{AppError, RepositoryContext, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::models::{UserProfile, UserUpdateInput};
use crate::response::{self, Envelope};
use crate::state::AppState;

const NOT_FOUND: &str = "User not found";

/// `GET /admin/users`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Envelope<Vec<UserProfile>>> {
    let users = UserRepository::new(state.pool())
        .list()
        .await
        .context("Failed to fetch users")?;

    Ok(Envelope::data(users))
}

/// `PUT /admin/users/{id}`
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(input): ApiJson<UserUpdateInput>,
) -> Result<Envelope> {
    apply_update(&state, id, input, "Error updating user").await?;
    Ok(response::ok("User updated successfully"))
}

/// `DELETE /admin/users/{id}`
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<UserId>) -> Result<Envelope> {
    UserRepository::new(state.pool())
        .delete(id)
        .await
        .context_or_not_found("Error deleting user", NOT_FOUND)?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(response::ok("User deleted successfully"))
}

/// `GET /user/profile/{id}`
#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Envelope<UserProfile>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await
        .context("Error fetching user profile")?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_owned()))?;

    Ok(Envelope::data(user))
}

/// `PUT /user/profile/{id}`
#[instrument(skip(state, input))]
pub async fn update_profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(input): ApiJson<UserUpdateInput>,
) -> Result<Envelope> {
    apply_update(&state, id, input, "Error updating profile").await?;
    Ok(response::ok("Profile updated successfully"))
}

async fn apply_update(
    state: &AppState,
    id: UserId,
    input: UserUpdateInput,
    failure: &str,
) -> Result<()> {
    let update = input.validate()?;
    UserRepository::new(state.pool())
        .update(id, &update)
        .await
        .context_or_not_found(failure, NOT_FOUND)
}
