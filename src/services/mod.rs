pub mod backend;
pub mod eligibility;
pub mod lifecycle;
pub mod tickets;
