// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_status_distribution,
        handlers::dashboard::get_top_performers,

        // --- Performance ---
        handlers::performance::get_performance,
        handlers::performance::list_user_deals,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::AdminDashboardView,
            models::dashboard::StatusSlice,
            models::dashboard::TopPerformer,

            // --- PERFORMANCE ---
            models::performance::PerformanceView,
            models::performance::MonthlyTrendEntry,
            models::performance::StatusBreakdown,
            models::performance::DealRow,
            models::deal::UserProfile,
        )
    ),
    tags(
        (name = "Dashboard", description = "Admin Control Center: cards, gráfico de status e ranking"),
        (name = "Performance", description = "Analytics de performance por executivo de vendas")
    )
)]
pub struct ApiDoc;
