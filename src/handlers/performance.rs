// src/handlers/performance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::performance::{DealRow, PerformanceView},
};

// Termo de busca da tabela de transações (substring, case-insensitive)
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DealSearchQuery {
    pub search: Option<String>,
}

// GET /api/performance/{user_id}
#[utoipa::path(
    get,
    path = "/api/performance/{user_id}",
    tag = "Performance",
    params(
        ("user_id" = i64, Path, description = "ID do executivo de vendas"),
        DealSearchQuery
    ),
    responses(
        (status = 200, description = "Visão de performance do executivo (perfil, tier, métricas, série mensal, tabela)", body = PerformanceView)
    )
)]
pub async fn get_performance(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<DealSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .performance_service
        .performance_view(user_id, query.search.as_deref(), Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/performance/{user_id}/deals
#[utoipa::path(
    get,
    path = "/api/performance/{user_id}/deals",
    tag = "Performance",
    params(
        ("user_id" = i64, Path, description = "ID do executivo de vendas"),
        DealSearchQuery
    ),
    responses(
        (status = 200, description = "Linhas da tabela de transações, filtradas pela busca", body = Vec<DealRow>)
    )
)]
pub async fn list_user_deals(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<DealSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .performance_service
        .deal_rows(user_id, query.search.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(rows)))
}
