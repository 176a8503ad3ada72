pub mod deals_api;
pub use deals_api::{DealsApiClient, DealsSource};
