use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::models::ticket::CustomStatus;

/// Identifier of an advisory completion rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, IntoStaticStr, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleKey {
    Dep7PubMsgApp,
    Dep6App,
    TicketTagCat,
}

/// One line of the advisory checklist shown in the "end task" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityRule {
    pub key: RuleKey,
    pub ok: bool,
    pub label: String,
}

/// Advisory breakdown for ending a ticket. `all_ok` is the AND of every rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityReport {
    #[serde(rename = "allOk")]
    pub all_ok: bool,
    pub rules: Vec<EligibilityRule>,
}

impl EligibilityReport {
    pub fn rule(&self, key: RuleKey) -> Option<&EligibilityRule> {
        self.rules.iter().find(|r| r.key == key)
    }
}

/// Response of `GET /api/v1/tickets/{id}/eligibility`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityResponse {
    #[serde(rename = "ticketID")]
    pub ticket_id: i64,
    pub status: CustomStatus,
    #[serde(rename = "allowedActions")]
    pub allowed_actions: Vec<String>,
    pub report: EligibilityReport,
    #[serde(rename = "pendingProducts")]
    pub pending_products: usize,
    /// Whether the hard gate and all advisory rules currently allow ending.
    #[serde(rename = "canEnd")]
    pub can_end: bool,
}
