/// Contact-form lead endpoints
///
/// - `POST /api/leads` - Public contact form submission
/// - `GET /api/leads` - Admin inbox, newest first

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, http::StatusCode, Json};
use mehndi_shared::models::lead::{CreateLead, Lead};
use tracing::info;
use validator::Validate;

/// Lists every lead
pub async fn list_leads(State(state): State<AppState>) -> ApiResult<Json<Vec<Lead>>> {
    let leads = state.store.list_leads().await?;
    Ok(Json(leads))
}

/// Stores a contact-form submission
///
/// # Errors
///
/// - `422 Unprocessable Entity`: missing name, phone or message, or a
///   malformed email
pub async fn create_lead(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateLead>,
) -> ApiResult<(StatusCode, Json<Lead>)> {
    req.validate()?;

    let lead = state.store.create_lead(req).await?;

    info!(lead_id = %lead.id, service = ?lead.service, "Lead received");
    Ok((StatusCode::CREATED, Json(lead)))
}
