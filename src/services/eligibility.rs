use tracing::debug;

use crate::models::eligibility::{EligibilityReport, EligibilityRule, RuleKey};
use crate::models::ticket::{Product, ProductStatus, Ticket};

/// Department whose tickets must be published, messaged and app-checked.
const PUBLISHING_DEPARTMENT: i32 = 7;

/// Department whose tickets must be app-checked.
const APP_CHECK_DEPARTMENT: i32 = 6;

/// Ticket types that must be tagged and categorized before ending.
const TAGGED_TICKET_TYPES: [i32; 2] = [5, 38];

/// Inputs of the evaluator, decoupled from the wire shape of a ticket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityInput {
    pub department_id: Option<i32>,
    pub ticket_type_id: Option<i32>,
    pub is_published: Option<bool>,
    pub is_message: Option<bool>,
    pub is_app_check: Option<bool>,
    pub is_tagged: Option<bool>,
    pub is_categorized: Option<bool>,
    pub product_statuses: Vec<ProductStatus>,
}

impl EligibilityInput {
    pub fn from_ticket(ticket: &Ticket, products: &[Product]) -> Self {
        Self {
            department_id: ticket.department_id,
            ticket_type_id: ticket.ticket_type_id,
            is_published: ticket.is_published,
            is_message: ticket.is_message,
            is_app_check: ticket.is_app_check,
            is_tagged: ticket.is_tagged,
            is_categorized: ticket.is_categorized,
            product_statuses: products.iter().filter_map(Product::status).collect(),
        }
    }
}

/// Reason a ticket may not be ended.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndRejection {
    #[error("{count} pending product(s) block completion")]
    PendingProducts { count: usize },

    #[error("{}", .unmet.join(", "))]
    RuleFailed {
        key: RuleKey,
        unmet: Vec<String>,
    },
}

impl EndRejection {
    /// Short machine-readable reason, used as a metrics label.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::PendingProducts { .. } => "pending_products",
            Self::RuleFailed { key, .. } => (*key).into(),
        }
    }
}

/// A flag counts as unmet only when the backend reported it as `false`.
/// Absent flags are not applicable and never block a ticket.
fn unmet_flags(flags: &[(&'static str, Option<bool>)]) -> Vec<&'static str> {
    flags
        .iter()
        .filter(|(_, value)| *value == Some(false))
        .map(|(name, _)| *name)
        .collect()
}

/// Evaluate one rule. Returns the unmet flags, or an empty list when the rule
/// passes or does not apply.
fn rule_unmet(key: RuleKey, input: &EligibilityInput) -> Vec<&'static str> {
    let applies = match key {
        RuleKey::Dep7PubMsgApp => input.department_id == Some(PUBLISHING_DEPARTMENT),
        RuleKey::Dep6App => input.department_id == Some(APP_CHECK_DEPARTMENT),
        RuleKey::TicketTagCat => input
            .ticket_type_id
            .is_some_and(|t| TAGGED_TICKET_TYPES.contains(&t)),
    };
    if !applies {
        return Vec::new();
    }

    match key {
        RuleKey::Dep7PubMsgApp => unmet_flags(&[
            ("isPublished", input.is_published),
            ("isMessage", input.is_message),
            ("isAppCheck", input.is_app_check),
        ]),
        RuleKey::Dep6App => unmet_flags(&[("isAppCheck", input.is_app_check)]),
        RuleKey::TicketTagCat => unmet_flags(&[
            ("isTagged", input.is_tagged),
            ("isCategorized", input.is_categorized),
        ]),
    }
}

const RULES: [(RuleKey, &str); 3] = [
    (
        RuleKey::Dep7PubMsgApp,
        "Department 7: published, customer messaged and app check done",
    ),
    (RuleKey::Dep6App, "Department 6: app check done"),
    (
        RuleKey::TicketTagCat,
        "Ticket types 5 and 38: tagged and categorized",
    ),
];

/// Compute the advisory checklist for ending a ticket.
///
/// Each rule is evaluated independently and reports `ok` when its department
/// or ticket type precondition does not match. The pending-products gate is
/// not part of this list; see [`pending_products_gate`].
pub fn evaluate(input: &EligibilityInput) -> EligibilityReport {
    let rules: Vec<EligibilityRule> = RULES
        .iter()
        .map(|(key, label)| EligibilityRule {
            key: *key,
            ok: rule_unmet(*key, input).is_empty(),
            label: label.to_string(),
        })
        .collect();

    let all_ok = rules.iter().all(|r| r.ok);
    debug!(
        department_id = ?input.department_id,
        ticket_type_id = ?input.ticket_type_id,
        all_ok,
        "Evaluated ticket eligibility"
    );

    EligibilityReport { all_ok, rules }
}

/// Number of products that would block ending a ticket of this department.
pub fn blocking_products(department_id: Option<i32>, statuses: &[ProductStatus]) -> usize {
    if department_id != Some(PUBLISHING_DEPARTMENT) {
        return 0;
    }
    statuses.iter().filter(|s| s.is_pending()).count()
}

/// Hard gate: a department 7 ticket cannot end while any product is pending.
///
/// Independent of the ticket type and of the advisory rules.
pub fn pending_products_gate(
    department_id: Option<i32>,
    statuses: &[ProductStatus],
) -> Result<(), EndRejection> {
    match blocking_products(department_id, statuses) {
        0 => Ok(()),
        count => Err(EndRejection::PendingProducts { count }),
    }
}

/// Submission-time validation for the "end" action.
///
/// Runs the pending-products gate first, then rejects on the first failing
/// advisory rule with the exact flags that are unmet.
pub fn check_end_submission(input: &EligibilityInput) -> Result<EligibilityReport, EndRejection> {
    pending_products_gate(input.department_id, &input.product_statuses)?;

    for (key, _) in RULES {
        let unmet = rule_unmet(key, input);
        if !unmet.is_empty() {
            return Err(EndRejection::RuleFailed {
                key,
                unmet: unmet.into_iter().map(|flag| format!("{flag} must be true")).collect(),
            });
        }
    }

    Ok(evaluate(input))
}
