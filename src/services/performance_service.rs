// src/services/performance_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    common::format,
    models::deal::Deal,
    models::performance::{DealRow, PerformanceView, StatusBreakdown},
    services::metrics_service::{matches_search, MetricsService},
    upstream::DealsSource,
};

// Monta a visão de performance de um executivo: perfil + tier + métricas
// + série mensal + tabela de transações (com busca).
#[derive(Clone)]
pub struct PerformanceService {
    source: Arc<dyn DealsSource>,
    metrics: MetricsService,
}

impl PerformanceService {
    pub fn new(source: Arc<dyn DealsSource>, metrics: MetricsService) -> Self {
        Self { source, metrics }
    }

    pub async fn performance_view(
        &self,
        user_id: i64,
        search: Option<&str>,
        reference: NaiveDate,
    ) -> Result<PerformanceView, AppError> {
        // O perfil nunca falha (substituto embutido no cliente)
        let profile = self.source.fetch_user_profile(user_id).await;

        let deals = match self.source.fetch_deals_for_user(user_id).await {
            Ok(deals) => deals,
            Err(e) => {
                tracing::error!("🔥 Falha ao buscar deals do usuário {}: {}", user_id, e);
                Vec::new()
            }
        };

        let m = self.metrics.derive(&deals, reference);

        // Doughnut do front: aprovado / resto-pendente / rejeitado
        let status_breakdown = StatusBreakdown {
            approved: m.approved,
            pending: m.total - m.approved - m.rejected,
            rejected: m.rejected,
        };

        Ok(PerformanceView {
            profile,
            tier: m.tier.name().to_string(),
            lifetime_revenue: m.total_revenue,
            lifetime_revenue_display: format::lakh(m.total_revenue),
            total_deals: m.total,
            approved_deals: m.approved,
            total_incentive_earned: m.total_incentive,
            total_incentive_display: format::thousands(m.total_incentive),
            approval_rate: m.approval_rate,
            average_deal_value: m.average_deal_size,
            average_deal_display: format::thousands(m.average_deal_size),
            monthly_trend: m.monthly_trend,
            status_breakdown,
            deals: transaction_rows(&deals, search),
        })
    }

    // Só as linhas da tabela, para o endpoint de busca da tabela
    pub async fn deal_rows(
        &self,
        user_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<DealRow>, AppError> {
        let deals = match self.source.fetch_deals_for_user(user_id).await {
            Ok(deals) => deals,
            Err(e) => {
                tracing::error!("🔥 Falha ao buscar deals do usuário {}: {}", user_id, e);
                Vec::new()
            }
        };
        Ok(transaction_rows(&deals, search))
    }
}

// Projeta os deals (já ordenados por data desc) nas linhas da tabela,
// aplicando o filtro de busca quando houver termo.
fn transaction_rows(deals: &[Deal], search: Option<&str>) -> Vec<DealRow> {
    let term = search.unwrap_or("");

    deals
        .iter()
        .filter(|d| matches_search(d, term))
        .map(|d| DealRow {
            id: d.id,
            date_display: d
                .effective_date
                .as_ref()
                .map(format::day)
                .unwrap_or_else(|| "N/A".to_string()),
            client_name: d
                .client_name
                .clone()
                .unwrap_or_else(|| "Unnamed Client".to_string()),
            amount: d.amount,
            incentive: d.incentive,
            status_label: d.status.label().to_string(),
            remarks: d.rejection_reason.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
