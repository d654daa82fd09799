//! Contact form route handlers.

use axum::extract::State;
use tracing::instrument;

use crate::db::ContactRepository;
use crate::error::{RepositoryContext, Result};
use crate::extract::ApiJson;
use crate::models::{ContactInput, ContactMessage};
use crate::response::{self, Envelope};
use crate::state::AppState;

/// `POST /contactus`
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ContactInput>,
) -> Result<Envelope> {
    let contact = input.validate()?;
    let contact_id = ContactRepository::new(state.pool())
        .create(&contact)
        .await
        .context("Failed to insert into ContactUs table")?;

    tracing::info!(%contact_id, "Contact message stored");
    Ok(response::ok("Contact details inserted successfully"))
}

/// `GET /contacts`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Envelope<Vec<ContactMessage>>> {
    let messages = ContactRepository::new(state.pool())
        .list()
        .await
        .context("Failed to fetch from ContactUs table")?;

    Ok(Envelope::data(messages))
}
