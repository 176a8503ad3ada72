pub mod deal;
pub mod dashboard;
pub mod performance;
