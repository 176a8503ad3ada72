// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Visão completa do Admin Control Center (cards + gráfico + ranking)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardView {
    #[schema(example = 42)]
    pub total_deals: usize,

    pub pending_count: usize,
    pub in_progress_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,

    // Incentivo total desembolsado (só deals aprovados)
    pub total_disbursed: Decimal,
    #[schema(example = "₹4.5L")]
    pub total_disbursed_display: String,

    // Usuários distintos com pelo menos um deal
    pub active_users: usize,

    #[schema(example = 50.0)]
    pub approval_rate: f64,

    pub avg_deal_size: Decimal,
    #[schema(example = "₹1.2L")]
    pub avg_deal_size_display: String,

    // --- Cards de ação prioritária ---

    // Deals acima do limiar configurado e ainda não aprovados
    pub high_value_count: usize,

    // Aprovados que ainda não foram pagos
    pub unprocessed_payouts: usize,

    // Pendentes há mais dias que o limite configurado
    pub stale_pending_count: usize,

    // Entrada de configuração: o upstream não expõe dados de atividade
    pub inactive_users: usize,

    pub system_healthy: bool,

    pub status_distribution: Vec<StatusSlice>,
    pub top_performers: Vec<TopPerformer>,
}

// 2. Fatia do gráfico de distribuição por status.
// A cor viaja junto porque o colaborador de gráficos consome isso como dado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSlice {
    #[schema(example = "Approved")]
    pub name: String,

    pub value: usize,

    #[schema(example = "#10B981")]
    pub color: String,
}

// 3. Entrada do ranking de melhores vendedores (top 3 por incentivo)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformer {
    #[schema(example = "Ana Souza")]
    pub name: String,

    // Quantidade de deals aprovados
    pub deals: usize,

    pub incentive: Decimal,

    #[schema(example = "₹25,000")]
    pub incentive_display: String,
}
