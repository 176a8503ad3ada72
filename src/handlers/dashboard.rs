// src/handlers/dashboard.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{AdminDashboardView, StatusSlice, TopPerformer},
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Visão completa do Admin Control Center", body = AdminDashboardView)
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .dashboard_service
        .admin_view(Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/dashboard/status-distribution
#[utoipa::path(
    get,
    path = "/api/dashboard/status-distribution",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Fatias do gráfico de distribuição por status (zeradas são omitidas)", body = Vec<StatusSlice>)
    )
)]
pub async fn get_status_distribution(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let slices = app_state
        .dashboard_service
        .status_distribution(Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(slices)))
}

// GET /api/dashboard/top-performers
#[utoipa::path(
    get,
    path = "/api/dashboard/top-performers",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Top 3 vendedores por incentivo aprovado", body = Vec<TopPerformer>)
    )
)]
pub async fn get_top_performers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let ranking = app_state
        .dashboard_service
        .top_performers(Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(ranking)))
}
