// src/models/performance.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::deal::UserProfile;

// --- TIER ---

// Classificação por receita aprovada acumulada. Limiares inclusivos,
// avaliados do maior para o menor. A ordem das variantes importa:
// derivamos Ord para poder comparar tiers entre si.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
pub enum Tier {
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub fn from_revenue(revenue: Decimal) -> Self {
        if revenue >= Decimal::from(5_000_000) {
            Tier::Diamond
        } else if revenue >= Decimal::from(2_500_000) {
            Tier::Platinum
        } else if revenue >= Decimal::from(1_000_000) {
            Tier::Gold
        } else {
            Tier::Silver
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        }
    }
}

// --- VIEW DE PERFORMANCE POR USUÁRIO ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceView {
    pub profile: UserProfile,

    #[schema(example = "Gold")]
    pub tier: String,

    // Receita aprovada acumulada (base do tier)
    pub lifetime_revenue: Decimal,
    #[schema(example = "₹12.50L")]
    pub lifetime_revenue_display: String,

    pub total_deals: usize,
    pub approved_deals: usize,

    pub total_incentive_earned: Decimal,
    #[schema(example = "₹85.0k")]
    pub total_incentive_display: String,

    #[schema(example = 62.5)]
    pub approval_rate: f64,

    pub average_deal_value: Decimal,
    #[schema(example = "₹120.0k")]
    pub average_deal_display: String,

    // Sempre 6 entradas, do mês mais antigo para o atual, zero-filled
    pub monthly_trend: Vec<MonthlyTrendEntry>,

    pub status_breakdown: StatusBreakdown,

    // Linhas da tabela de transações, já filtradas pela busca (se houver)
    pub deals: Vec<DealRow>,
}

// Bucket da série mensal de incentivos (chave YYYY-MM)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendEntry {
    #[schema(example = "2024-01")]
    pub month: String,

    pub incentive_sum: Decimal,
}

// Dados do gráfico doughnut: aprovado / resto-pendente / rejeitado
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

// Linha da tabela de histórico de transações
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealRow {
    pub id: Option<i64>,

    #[schema(example = "15/01/2024")]
    pub date_display: String,

    #[schema(example = "Acme Corp")]
    pub client_name: String,

    pub amount: Decimal,
    pub incentive: Decimal,

    #[schema(example = "APPROVED")]
    pub status_label: String,

    // Motivo de rejeição, ou "-" quando não há
    #[schema(example = "-")]
    pub remarks: String,
}
