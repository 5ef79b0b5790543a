use std::sync::Arc;

use crate::services::{backend::BackendClient, tickets::TicketService};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub tickets: TicketService,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        let backend = Arc::new(backend);
        Self {
            tickets: TicketService::new(backend.clone()),
            backend,
        }
    }
}
