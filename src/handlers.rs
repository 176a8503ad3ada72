pub mod dashboard;
pub mod performance;
