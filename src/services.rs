pub mod metrics_service;
pub use metrics_service::MetricsService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod performance_service;
pub use performance_service::PerformanceService;
