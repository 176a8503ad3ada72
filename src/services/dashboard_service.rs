// src/services/dashboard_service.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    common::format,
    config::DashboardTuning,
    models::dashboard::{AdminDashboardView, StatusSlice, TopPerformer},
    models::deal::DealStatus,
    services::metrics_service::MetricsService,
    upstream::DealsSource,
};

// Monta a visão do Admin Control Center: busca a coleção completa,
// deriva as métricas e projeta os cards/gráficos/ranking.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn DealsSource>,
    metrics: MetricsService,
    tuning: DashboardTuning,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DealsSource>, metrics: MetricsService, tuning: DashboardTuning) -> Self {
        Self { source, metrics, tuning }
    }

    pub async fn admin_view(&self, reference: NaiveDate) -> Result<AdminDashboardView, AppError> {
        // Falha total do upstream não derruba a view: renderizamos o
        // estado zero e deixamos o log contar o que houve.
        let deals = match self.source.fetch_all_deals().await {
            Ok(deals) => deals,
            Err(e) => {
                tracing::error!("🔥 Falha ao buscar deals da API upstream: {}", e);
                Vec::new()
            }
        };

        let m = self.metrics.derive(&deals, reference);

        let active_users = deals
            .iter()
            .filter_map(|d| d.owner.as_ref().map(|o| o.id))
            .collect::<HashSet<_>>()
            .len();

        let high_value_count = self.metrics.high_value_attention(&deals);
        let unprocessed_payouts = deals
            .iter()
            .filter(|d| d.status == DealStatus::Approved && !d.paid)
            .count();
        let stale_pending_count = self.metrics.stale_pending(&deals, reference);
        let inactive_users = self.tuning.inactive_user_count;

        Ok(AdminDashboardView {
            total_deals: m.total,
            pending_count: m.pending,
            in_progress_count: m.in_progress,
            approved_count: m.approved,
            rejected_count: m.rejected,
            total_disbursed: m.total_incentive,
            total_disbursed_display: format::lakh(m.total_incentive),
            active_users,
            approval_rate: m.approval_rate,
            avg_deal_size: m.average_deal_size,
            avg_deal_size_display: format::lakh(m.average_deal_size),
            high_value_count,
            unprocessed_payouts,
            stale_pending_count,
            inactive_users,
            system_healthy: stale_pending_count == 0 && inactive_users == 0,
            status_distribution: status_distribution(m.approved, m.pending, m.rejected, m.in_progress),
            top_performers: m.top_performers,
        })
    }

    pub async fn status_distribution(&self, reference: NaiveDate) -> Result<Vec<StatusSlice>, AppError> {
        Ok(self.admin_view(reference).await?.status_distribution)
    }

    pub async fn top_performers(&self, reference: NaiveDate) -> Result<Vec<TopPerformer>, AppError> {
        Ok(self.admin_view(reference).await?.top_performers)
    }
}

// Fatias do gráfico de pizza, na ordem do front original; fatia com
// contagem zero não aparece.
fn status_distribution(
    approved: usize,
    pending: usize,
    rejected: usize,
    in_progress: usize,
) -> Vec<StatusSlice> {
    let slices = [
        (DealStatus::Approved, approved, "#10B981"),
        (DealStatus::Pending, pending, "#F59E0B"),
        (DealStatus::Rejected, rejected, "#EF4444"),
        (DealStatus::InProgress, in_progress, "#6366F1"),
    ];

    slices
        .into_iter()
        .filter(|(_, value, _)| *value > 0)
        .map(|(status, value, color)| StatusSlice {
            name: status.display_name().to_string(),
            value,
            color: color.to_string(),
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::StubSource;
    use super::*;
    use crate::models::deal::{Deal, DealOwner};
    use rust_decimal::Decimal;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn service(source: StubSource) -> DashboardService {
        let tuning = DashboardTuning::default();
        DashboardService::new(Arc::new(source), MetricsService::new(tuning.clone()), tuning)
    }

    fn deal(status: DealStatus, amount: i64, incentive: i64, owner_id: Option<i64>, paid: bool) -> Deal {
        Deal {
            id: None,
            client_name: None,
            amount: Decimal::from(amount),
            incentive: Decimal::from(incentive),
            status,
            effective_date: None,
            owner: owner_id.map(|id| DealOwner { id, name: Some(format!("U{}", id)) }),
            rejection_reason: None,
            paid,
        }
    }

    #[tokio::test]
    async fn upstream_fora_do_ar_renderiza_estado_zero() {
        let view = service(StubSource::failing()).admin_view(reference()).await.unwrap();
        assert_eq!(view.total_deals, 0);
        assert_eq!(view.approval_rate, 0.0);
        assert_eq!(view.total_disbursed, Decimal::ZERO);
        assert!(view.status_distribution.is_empty());
        assert!(view.top_performers.is_empty());
        assert!(view.system_healthy);
    }

    #[tokio::test]
    async fn cards_do_admin_refletem_a_colecao() {
        let deals = vec![
            deal(DealStatus::Approved, 100_000, 10_000, Some(1), true),
            deal(DealStatus::Approved, 200_000, 20_000, Some(2), false), // payout pendente
            deal(DealStatus::Pending, 600_000, 0, Some(1), false),       // alto valor
            deal(DealStatus::Rejected, 50_000, 0, None, false),
        ];
        let view = service(StubSource::with_deals(deals)).admin_view(reference()).await.unwrap();

        assert_eq!(view.total_deals, 4);
        assert_eq!(view.approved_count, 2);
        assert_eq!(view.pending_count, 1);
        assert_eq!(view.rejected_count, 1);
        assert_eq!(view.total_disbursed, Decimal::from(30_000));
        assert_eq!(view.active_users, 2);
        assert_eq!(view.unprocessed_payouts, 1);
        assert_eq!(view.high_value_count, 1);
        assert_eq!(view.approval_rate, 50.0);
    }

    #[tokio::test]
    async fn distribuicao_omite_fatias_zeradas() {
        let deals = vec![
            deal(DealStatus::Approved, 1, 0, None, false),
            deal(DealStatus::Rejected, 1, 0, None, false),
        ];
        let slices = service(StubSource::with_deals(deals))
            .status_distribution(reference())
            .await
            .unwrap();
        let names: Vec<_> = slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Approved", "Rejected"]);
    }
}
