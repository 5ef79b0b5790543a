//! Work ticket dashboard service
//!
//! Library behind the taskdesk dashboard: typed tickets, products and work
//! logs, the ticket lifecycle state machine, the eligibility rules gating the
//! end of a ticket, a client for the work ticket backend, and the navigation
//! state of the dashboard's horizontal card carousels.

pub mod app_state;
pub mod carousel;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
