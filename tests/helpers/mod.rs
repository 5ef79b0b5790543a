//! Mock work ticket backend and request helpers for API tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Method, Request, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskdesk::app_state::AppState;
use taskdesk::routes;
use taskdesk::services::backend::BackendClient;

use crate::fixtures;

/// Calls the mock backend received that change data.
#[derive(Debug, Default)]
pub struct Recorded {
    pub started_logs: Vec<Value>,
    pub edited_logs: Vec<(i64, Value)>,
    pub status_updates: Vec<(i64, i64)>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    tickets: Arc<Mutex<HashMap<i64, Value>>>,
    products: Arc<Mutex<HashMap<i64, Vec<Value>>>>,
    pub recorded: Arc<Mutex<Recorded>>,
    fail_status_updates: Arc<AtomicBool>,
    fail_work_logs: Arc<AtomicBool>,
}

#[derive(Deserialize)]
struct ProductQuery {
    #[serde(rename = "ticketID")]
    ticket_id: i64,
}

async fn get_ticket(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let tickets = mock.tickets.lock().unwrap();
    tickets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_products(
    State(mock): State<MockBackend>,
    Query(query): Query<ProductQuery>,
) -> Json<Value> {
    let products = mock.products.lock().unwrap();
    Json(Value::Array(
        products.get(&query.ticket_id).cloned().unwrap_or_default(),
    ))
}

async fn start_log(
    State(mock): State<MockBackend>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if mock.fail_work_logs.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    mock.recorded.lock().unwrap().started_logs.push(body.clone());
    Ok(Json(json!({
        "workLogID": 900,
        "ticketID": body["ticketID"],
        "userID": body["userID"],
        "startTime": body["startTime"],
        "customStatusID": body["customStatusID"],
    })))
}

async fn edit_log(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if mock.fail_work_logs.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    mock.recorded.lock().unwrap().edited_logs.push((id, body.clone()));
    Ok(Json(json!({
        "workLogID": id,
        "ticketID": 1,
        "userID": 42,
        "startTime": "2026-10-16T08:00:00Z",
        "endTime": body["endTime"],
        "customStatusID": body["customStatusID"],
        "note": body.get("note").cloned().unwrap_or(Value::Null),
    })))
}

async fn update_status(
    State(mock): State<MockBackend>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if mock.fail_status_updates.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let status = body["customStatusID"].as_i64().ok_or(StatusCode::BAD_REQUEST)?;
    let mut tickets = mock.tickets.lock().unwrap();
    let ticket = tickets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    ticket["customStatusID"] = json!(status);
    mock.recorded.lock().unwrap().status_updates.push((id, status));
    Ok(Json(ticket.clone()))
}

impl MockBackend {
    pub fn seeded() -> Self {
        let mock = Self::default();
        {
            let mut tickets = mock.tickets.lock().unwrap();
            let mut products = mock.products.lock().unwrap();
            for (ticket, items) in fixtures::seed() {
                let id = ticket["ticketID"].as_i64().unwrap();
                tickets.insert(id, ticket);
                products.insert(id, items);
            }
        }
        mock
    }

    /// Serve the mock on an ephemeral port and return its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/health", get(|| async { StatusCode::OK }))
            .route("/tickets/{id}", get(get_ticket))
            .route("/tickets/{id}/status", put(update_status))
            .route("/products", get(list_products))
            .route("/workLogs", post(start_log))
            .route("/workLogs/{id}", put(edit_log))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Make `PUT /tickets/{id}/status` answer 500.
    pub fn fail_status_updates(&self) {
        self.fail_status_updates.store(true, Ordering::SeqCst);
    }

    /// Make `POST /workLogs` and `PUT /workLogs/{id}` answer 500.
    pub fn fail_work_logs(&self) {
        self.fail_work_logs.store(true, Ordering::SeqCst);
    }

    pub fn ticket_status(&self, id: i64) -> Option<i64> {
        let tickets = self.tickets.lock().unwrap();
        tickets.get(&id).and_then(|t| t["customStatusID"].as_i64())
    }
}

/// Start a seeded mock backend and build the service router against it.
pub async fn test_app() -> (Router, MockBackend) {
    let mock = MockBackend::seeded();
    let base_url = mock.spawn().await;
    let backend = BackendClient::new(&base_url, Duration::from_secs(5)).unwrap();
    (routes::api_router(AppState::new(backend)), mock)
}

/// Send a request as user 42 with `role` (no session headers when `None`).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    role: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, role, body.map(|b| b.to_string())).await
}

/// Like [`send`], with the JSON body passed through verbatim.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    role: Option<&str>,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder
            .header("x-user-id", "42")
            .header("x-user-role", role);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        tokio_test::assert_ok!(serde_json::from_slice::<Value>(&bytes))
    };
    (status, value)
}
