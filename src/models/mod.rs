pub mod eligibility;
pub mod preferences;
pub mod session;
pub mod ticket;
pub mod work_log;
