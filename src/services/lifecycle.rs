use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::models::ticket::CustomStatus;

/// Actions a user can take on a ticket from the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, EnumIter, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TicketAction {
    Start,
    Pause,
    Resume,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("ticket is {from} and can no longer change")]
    Terminal { from: CustomStatus },

    #[error("cannot {action} a ticket that is {from}")]
    NotAllowed {
        from: CustomStatus,
        action: TicketAction,
    },
}

/// Apply `action` to a ticket in status `from`.
///
/// ```text
/// NotStarted --start--> InProgress --end--> Completed
///                       InProgress --pause--> Paused --resume--> InProgress
/// NotStarted | InProgress | Paused --cancel--> Cancelled
/// ```
///
/// Ending is additionally gated by the eligibility check, which callers run
/// before applying the transition.
pub fn transition(from: CustomStatus, action: TicketAction) -> Result<CustomStatus, TransitionError> {
    use CustomStatus::*;

    if from.is_terminal() {
        return Err(TransitionError::Terminal { from });
    }

    match (from, action) {
        (NotStarted, TicketAction::Start) => Ok(InProgress),
        (InProgress, TicketAction::Pause) => Ok(Paused),
        (Paused, TicketAction::Resume) => Ok(InProgress),
        (InProgress, TicketAction::End) => Ok(Completed),
        (NotStarted | InProgress | Paused, TicketAction::Cancel) => Ok(Cancelled),
        _ => Err(TransitionError::NotAllowed { from, action }),
    }
}

/// Actions whose buttons should be enabled for a ticket in `status`.
pub fn allowed_actions(status: CustomStatus) -> Vec<TicketAction> {
    TicketAction::iter()
        .filter(|action| transition(status, *action).is_ok())
        .collect()
}
