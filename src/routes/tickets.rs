use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use crate::app_state::AppState;
use crate::models::eligibility::EligibilityResponse;
use crate::models::session::Session;
use crate::models::work_log::{TicketActionRequest, TicketActionResponse};
use crate::routes::error::AppError;
use crate::services::lifecycle::TicketAction;

/// GET /api/v1/tickets/{id}/eligibility — Checklist for the "end task" dialog.
pub async fn get_eligibility(
    State(state): State<AppState>,
    _session: Session,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<EligibilityResponse>, AppError> {
    let Path(ticket_id) = path?;
    Ok(Json(state.tickets.eligibility(ticket_id).await?))
}

/// POST /api/v1/tickets/{id}/{action} — Start, pause, resume, end or cancel.
pub async fn perform_action(
    State(state): State<AppState>,
    session: Session,
    path: Result<Path<(i64, String)>, PathRejection>,
    body: Result<Option<Json<TicketActionRequest>>, JsonRejection>,
) -> Result<Json<TicketActionResponse>, AppError> {
    let Path((ticket_id, action)) = path?;
    let action: TicketAction = action
        .parse()
        .map_err(|_| AppError::NotFound(format!("unknown ticket action '{action}'")))?;
    let request = body?.map(|Json(b)| b).unwrap_or_default();

    let response = state
        .tickets
        .perform(session, ticket_id, action, request)
        .await?;
    Ok(Json(response))
}
