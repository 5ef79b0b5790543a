use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use garde::Validate;
use tracing::{error, info, warn};

use crate::models::eligibility::EligibilityResponse;
use crate::models::session::Session;
use crate::models::ticket::{CustomStatus, Ticket};
use crate::models::work_log::{
    EditLogRequest, StartLogRequest, TicketActionRequest, TicketActionResponse, WorkLog,
};
use crate::services::backend::{BackendClient, BackendError};
use crate::services::eligibility::{self, EligibilityInput, EndRejection};
use crate::services::lifecycle::{self, TicketAction, TransitionError};

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("ticket cannot be ended: {0}")]
    Rejected(#[from] EndRejection),

    #[error("workLogID is required to {0} a ticket")]
    MissingWorkLog(TicketAction),

    #[error("invalid request: {0}")]
    Invalid(#[from] garde::Report),
}

/// Ticket actions of the dashboard, composed from the backend client, the
/// lifecycle state machine and the eligibility evaluator.
#[derive(Clone)]
pub struct TicketService {
    backend: Arc<BackendClient>,
}

impl TicketService {
    pub fn new(backend: Arc<BackendClient>) -> Self {
        Self { backend }
    }

    /// Advisory checklist plus the hard gate, for rendering the end dialog.
    pub async fn eligibility(&self, ticket_id: i64) -> Result<EligibilityResponse, TicketError> {
        let (ticket, products) = tokio::try_join!(
            self.backend.get_ticket(ticket_id),
            self.backend.list_products(ticket_id),
        )?;

        let input = EligibilityInput::from_ticket(&ticket, &products);
        let report = eligibility::evaluate(&input);
        let pending_products =
            eligibility::blocking_products(input.department_id, &input.product_statuses);
        let allowed = lifecycle::allowed_actions(ticket.status);
        let can_end = allowed.contains(&TicketAction::End)
            && eligibility::check_end_submission(&input).is_ok();

        Ok(EligibilityResponse {
            ticket_id,
            status: ticket.status,
            allowed_actions: allowed.iter().map(ToString::to_string).collect(),
            report,
            pending_products,
            can_end,
        })
    }

    pub async fn perform(
        &self,
        session: Session,
        ticket_id: i64,
        action: TicketAction,
        request: TicketActionRequest,
    ) -> Result<TicketActionResponse, TicketError> {
        request.validate()?;

        let result = match action {
            TicketAction::Start | TicketAction::Resume => {
                self.open_log(session, ticket_id, action).await
            }
            TicketAction::Pause => self.pause(ticket_id, request).await,
            TicketAction::End => self.end(session, ticket_id, request).await,
            TicketAction::Cancel => self.cancel(ticket_id, request).await,
        };

        let outcome = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "ticket_actions_total",
            "action" => action.to_string(),
            "outcome" => outcome
        )
        .increment(1);

        result
    }

    /// Start or resume: move the ticket to in progress and open a new work log.
    async fn open_log(
        &self,
        session: Session,
        ticket_id: i64,
        action: TicketAction,
    ) -> Result<TicketActionResponse, TicketError> {
        let ticket = self.backend.get_ticket(ticket_id).await?;
        let next = lifecycle::transition(ticket.status, action)?;

        let request = StartLogRequest {
            ticket_id,
            user_id: session.user_id,
            start_time: Utc::now(),
            status: next,
        };
        self.commit(&ticket, action, next, async {
            Ok::<_, TicketError>(Some(self.backend.start_log(&request).await?))
        })
        .await
    }

    /// Pause: close the open work log.
    async fn pause(
        &self,
        ticket_id: i64,
        request: TicketActionRequest,
    ) -> Result<TicketActionResponse, TicketError> {
        let work_log_id = request
            .work_log_id
            .ok_or(TicketError::MissingWorkLog(TicketAction::Pause))?;
        let ticket = self.backend.get_ticket(ticket_id).await?;
        let next = lifecycle::transition(ticket.status, TicketAction::Pause)?;

        let body = close_log(next, request.note)?;
        self.commit(&ticket, TicketAction::Pause, next, async {
            Ok::<_, TicketError>(Some(self.backend.edit_log(work_log_id, &body).await?))
        })
        .await
    }

    /// End: only after the pending-products gate and every advisory rule pass.
    async fn end(
        &self,
        session: Session,
        ticket_id: i64,
        request: TicketActionRequest,
    ) -> Result<TicketActionResponse, TicketError> {
        let work_log_id = request
            .work_log_id
            .ok_or(TicketError::MissingWorkLog(TicketAction::End))?;

        let (ticket, products) = tokio::try_join!(
            self.backend.get_ticket(ticket_id),
            self.backend.list_products(ticket_id),
        )?;
        let next = lifecycle::transition(ticket.status, TicketAction::End)?;

        let input = EligibilityInput::from_ticket(&ticket, &products);
        if let Err(rejection) = eligibility::check_end_submission(&input) {
            warn!(
                ticket_id,
                user_id = session.user_id,
                reason = rejection.reason(),
                message = %rejection,
                "End of ticket rejected"
            );
            metrics::counter!("end_rejections_total", "reason" => rejection.reason())
                .increment(1);
            return Err(rejection.into());
        }

        let body = close_log(next, request.note)?;
        self.commit(&ticket, TicketAction::End, next, async {
            Ok::<_, TicketError>(Some(self.backend.edit_log(work_log_id, &body).await?))
        })
        .await
    }

    /// Cancel: closes the open work log when there is one.
    async fn cancel(
        &self,
        ticket_id: i64,
        request: TicketActionRequest,
    ) -> Result<TicketActionResponse, TicketError> {
        let ticket = self.backend.get_ticket(ticket_id).await?;
        let next = lifecycle::transition(ticket.status, TicketAction::Cancel)?;

        let work_log_id = request.work_log_id;
        let body = close_log(next, request.note)?;
        self.commit(&ticket, TicketAction::Cancel, next, async {
            match work_log_id {
                Some(id) => Ok::<_, TicketError>(Some(self.backend.edit_log(id, &body).await?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Move the ticket to `next`, then write its work log.
    ///
    /// The status goes first so a failed status update leaves no log behind.
    /// When the log write fails the previous status is put back.
    async fn commit<F>(
        &self,
        ticket: &Ticket,
        action: TicketAction,
        next: CustomStatus,
        write_log: F,
    ) -> Result<TicketActionResponse, TicketError>
    where
        F: Future<Output = Result<Option<WorkLog>, TicketError>>,
    {
        self.backend
            .update_ticket_status(ticket.ticket_id, next)
            .await?;

        let work_log = match write_log.await {
            Ok(log) => log,
            Err(err) => {
                self.restore_status(ticket, action, &err).await;
                return Err(err);
            }
        };

        info!(
            ticket_id = ticket.ticket_id,
            %action,
            from = %ticket.status,
            to = %next,
            "Ticket status changed"
        );

        Ok(TicketActionResponse {
            ticket_id: ticket.ticket_id,
            status: next,
            status_name: next.to_string(),
            work_log,
        })
    }

    async fn restore_status(&self, ticket: &Ticket, action: TicketAction, cause: &TicketError) {
        match self
            .backend
            .update_ticket_status(ticket.ticket_id, ticket.status)
            .await
        {
            Ok(_) => warn!(
                ticket_id = ticket.ticket_id,
                %action,
                status = %ticket.status,
                error = %cause,
                "Work log write failed, ticket status restored"
            ),
            Err(restore) => error!(
                ticket_id = ticket.ticket_id,
                %action,
                status = %ticket.status,
                error = %cause,
                restore_error = %restore,
                "Work log write failed and ticket status could not be restored"
            ),
        }
    }
}

fn close_log(status: CustomStatus, note: Option<String>) -> Result<EditLogRequest, TicketError> {
    let body = EditLogRequest {
        end_time: Utc::now(),
        status,
        note,
    };
    body.validate()?;
    Ok(body)
}
