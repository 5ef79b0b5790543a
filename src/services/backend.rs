//! Work Ticket Backend Client
//!
//! Typed client for the external REST backend that owns tickets, products and
//! work logs. Endpoint paths and payload shapes are fixed by that backend.

use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::ticket::{CustomStatus, Product, Ticket};
use crate::models::work_log::{EditLogRequest, StartLogRequest, WorkLog};

/// Error type for backend calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request to backend failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Client for the work ticket backend (`tickets`, `products`, `workLogs`).
pub struct BackendClient {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
struct StatusUpdate {
    #[serde(rename = "customStatusID")]
    status: CustomStatus,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder()
            .user_agent(concat!("taskdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request, record its latency and decode a JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        resource: String,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let started = Instant::now();
        let response = request.send().await;
        metrics::histogram!("backend_request_seconds", "endpoint" => endpoint)
            .record(started.elapsed().as_secs_f64());

        let response = response?;
        let status = response.status();
        debug!(endpoint, %status, "Backend responded");

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound { resource });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, %status, body = %body, "Backend call failed");
            return Err(BackendError::Status { status, body });
        }

        Ok(response.json().await?)
    }

    /// `GET /tickets/{id}`
    pub async fn get_ticket(&self, ticket_id: i64) -> Result<Ticket, BackendError> {
        let req = self.request(Method::GET, &format!("/tickets/{ticket_id}"));
        self.send("get_ticket", format!("ticket {ticket_id}"), req).await
    }

    /// `GET /products?ticketID={id}`
    pub async fn list_products(&self, ticket_id: i64) -> Result<Vec<Product>, BackendError> {
        let req = self
            .request(Method::GET, "/products")
            .query(&[("ticketID", ticket_id)]);
        self.send("list_products", format!("products of ticket {ticket_id}"), req)
            .await
    }

    /// `POST /workLogs`
    pub async fn start_log(&self, body: &StartLogRequest) -> Result<WorkLog, BackendError> {
        let req = self.request(Method::POST, "/workLogs").json(body);
        self.send("start_log", format!("ticket {}", body.ticket_id), req)
            .await
    }

    /// `PUT /workLogs/{id}`
    pub async fn edit_log(
        &self,
        work_log_id: i64,
        body: &EditLogRequest,
    ) -> Result<WorkLog, BackendError> {
        let req = self
            .request(Method::PUT, &format!("/workLogs/{work_log_id}"))
            .json(body);
        self.send("edit_log", format!("work log {work_log_id}"), req)
            .await
    }

    /// `PUT /tickets/{id}/status`
    pub async fn update_ticket_status(
        &self,
        ticket_id: i64,
        status: CustomStatus,
    ) -> Result<Ticket, BackendError> {
        let req = self
            .request(Method::PUT, &format!("/tickets/{ticket_id}/status"))
            .json(&StatusUpdate { status });
        self.send("update_ticket_status", format!("ticket {ticket_id}"), req)
            .await
    }

    /// `GET /health`, used by our own health check.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let response = self.request(Method::GET, "/health").send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                status,
                body: String::new(),
            })
        }
    }
}
