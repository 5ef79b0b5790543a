use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::ticket::CustomStatus;

/// A time-tracked record of a user working on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkLog {
    #[serde(rename = "workLogID")]
    pub work_log_id: i64,
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "customStatusID")]
    pub status: CustomStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for `POST /workLogs`, opening a new log when work starts or resumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartLogRequest {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "customStatusID")]
    pub status: CustomStatus,
}

/// Payload for `PUT /workLogs/{id}`, closing a log on pause, end or cancel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct EditLogRequest {
    #[garde(skip)]
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,

    #[garde(skip)]
    #[serde(rename = "customStatusID")]
    pub status: CustomStatus,

    #[garde(length(max = 2000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body accepted by the ticket action endpoints.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TicketActionRequest {
    /// Open work log to close. Required for pause, end and cancel.
    #[garde(range(min = 1))]
    #[serde(rename = "workLogID", default)]
    pub work_log_id: Option<i64>,

    #[garde(length(max = 2000))]
    #[serde(default)]
    pub note: Option<String>,
}

/// Result of a ticket action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketActionResponse {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    pub status: CustomStatus,
    #[serde(rename = "statusName")]
    pub status_name: String,
    /// Absent when a ticket is cancelled before any work was logged.
    #[serde(rename = "workLog")]
    pub work_log: Option<WorkLog>,
}
