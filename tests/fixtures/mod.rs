//! Backend payloads used across the API tests

use serde_json::{json, Value};

pub const NOT_STARTED: i32 = 8;
pub const IN_PROGRESS: i32 = 9;
pub const PAUSED: i32 = 11;
pub const COMPLETED: i32 = 10;

/// Department 7 ticket with every advisory flag set.
pub const READY_DEP7: i64 = 101;
/// Department 7 ticket, flags set, but one product still pending.
pub const DEP7_PENDING_PRODUCT: i64 = 102;
/// Department 7 ticket whose app check is not done.
pub const DEP7_NO_APP_CHECK: i64 = 103;
/// Ticket type 38 that is categorized but not tagged.
pub const UNTAGGED_TYPE38: i64 = 104;
/// Fresh ticket outside every rule.
pub const FRESH: i64 = 105;
pub const PAUSED_TICKET: i64 = 106;
pub const COMPLETED_TICKET: i64 = 107;
/// Department 7 ticket, flags set, with products the backend left without a status.
pub const DEP7_UNSET_PRODUCTS: i64 = 108;

pub fn ticket(id: i64, department: i32, ticket_type: i32, status: i32, flags: Value) -> Value {
    let mut ticket = json!({
        "ticketID": id,
        "title": format!("Ticket {id}"),
        "departmentID": department,
        "ticketTypeID": ticket_type,
        "customStatusID": status,
    });
    if let (Some(target), Some(flags)) = (ticket.as_object_mut(), flags.as_object()) {
        for (key, value) in flags {
            target.insert(key.clone(), value.clone());
        }
    }
    ticket
}

pub fn product(id: i64, ticket_id: i64, status: i32) -> Value {
    json!({
        "productID": id,
        "ticketID": ticket_id,
        "name": format!("Product {id}"),
        "customStatus": { "customStatusID": status },
    })
}

/// Product whose status was never assigned (`customStatus` null or missing).
pub fn product_without_status(id: i64, ticket_id: i64, explicit_null: bool) -> Value {
    let mut product = json!({
        "productID": id,
        "ticketID": ticket_id,
        "name": format!("Product {id}"),
    });
    if explicit_null {
        product["customStatus"] = Value::Null;
    }
    product
}

fn dep7_flags() -> Value {
    json!({ "isPublished": true, "isMessage": true, "isAppCheck": true })
}

/// Tickets and their products as the mock backend serves them.
pub fn seed() -> Vec<(Value, Vec<Value>)> {
    vec![
        (
            ticket(READY_DEP7, 7, 1, IN_PROGRESS, dep7_flags()),
            vec![product(1, READY_DEP7, 21)],
        ),
        (
            ticket(DEP7_PENDING_PRODUCT, 7, 1, IN_PROGRESS, dep7_flags()),
            vec![
                product(2, DEP7_PENDING_PRODUCT, 21),
                product(3, DEP7_PENDING_PRODUCT, 20),
            ],
        ),
        (
            ticket(
                DEP7_NO_APP_CHECK,
                7,
                1,
                IN_PROGRESS,
                json!({ "isPublished": true, "isMessage": true, "isAppCheck": false }),
            ),
            Vec::new(),
        ),
        (
            ticket(
                UNTAGGED_TYPE38,
                2,
                38,
                IN_PROGRESS,
                json!({ "isTagged": false, "isCategorized": true }),
            ),
            Vec::new(),
        ),
        (ticket(FRESH, 1, 1, NOT_STARTED, json!({})), Vec::new()),
        (ticket(PAUSED_TICKET, 1, 1, PAUSED, json!({})), Vec::new()),
        (ticket(COMPLETED_TICKET, 1, 1, COMPLETED, json!({})), Vec::new()),
        (
            ticket(DEP7_UNSET_PRODUCTS, 7, 1, IN_PROGRESS, dep7_flags()),
            vec![
                product_without_status(4, DEP7_UNSET_PRODUCTS, true),
                product_without_status(5, DEP7_UNSET_PRODUCTS, false),
            ],
        ),
    ]
}
