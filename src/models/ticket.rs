use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of a ticket. The backend sends the numeric `customStatusID`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum CustomStatus {
    #[strum(serialize = "Not Started")]
    NotStarted,
    #[strum(serialize = "In Progress")]
    InProgress,
    Completed,
    Paused,
    Cancelled,
}

impl CustomStatus {
    pub const fn id(self) -> i32 {
        match self {
            Self::NotStarted => 8,
            Self::InProgress => 9,
            Self::Completed => 10,
            Self::Paused => 11,
            Self::Cancelled => 12,
        }
    }

    /// `Completed` and `Cancelled` accept no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl From<CustomStatus> for i32 {
    fn from(status: CustomStatus) -> Self {
        status.id()
    }
}

impl TryFrom<i32> for CustomStatus {
    type Error = UnknownStatus;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        match id {
            8 => Ok(Self::NotStarted),
            9 => Ok(Self::InProgress),
            10 => Ok(Self::Completed),
            11 => Ok(Self::Paused),
            12 => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown ticket status id {0}")]
pub struct UnknownStatus(pub i32);

/// Product status id. Only "pending" carries meaning for ticket completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ProductStatus(pub i32);

impl ProductStatus {
    /// Pending / stuck product.
    pub const PENDING: Self = Self(20);

    pub fn is_pending(self) -> bool {
        self == Self::PENDING
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductStatusRef {
    #[serde(rename = "customStatusID")]
    pub custom_status_id: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A product attached to exactly one ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: i64,
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(default)]
    pub name: String,
    /// Absent or null when the backend has not assigned a status yet.
    #[serde(rename = "customStatus", default)]
    pub custom_status: Option<ProductStatusRef>,
}

impl Product {
    pub fn status(&self) -> Option<ProductStatus> {
        self.custom_status.as_ref().map(|s| s.custom_status_id)
    }
}

/// A unit of assigned work as returned by the backend.
///
/// Department, ticket type and the completion flags are optional on the wire;
/// the eligibility rules treat an absent value as "not applicable".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "departmentID", default)]
    pub department_id: Option<i32>,
    #[serde(rename = "ticketTypeID", default)]
    pub ticket_type_id: Option<i32>,
    #[serde(rename = "customStatusID")]
    pub status: CustomStatus,
    #[serde(rename = "isPublished", default)]
    pub is_published: Option<bool>,
    #[serde(rename = "isMessage", default)]
    pub is_message: Option<bool>,
    #[serde(rename = "isAppCheck", default)]
    pub is_app_check: Option<bool>,
    #[serde(rename = "isTagged", default)]
    pub is_tagged: Option<bool>,
    #[serde(rename = "isCategorized", default)]
    pub is_categorized: Option<bool>,
}
