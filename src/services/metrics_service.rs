// src/services/metrics_service.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::format,
    config::DashboardTuning,
    models::dashboard::TopPerformer,
    models::deal::{Deal, DealStatus},
    models::performance::{MonthlyTrendEntry, Tier},
};

// Métricas derivadas da coleção de deals. Tudo aqui é projeção pura:
// função de (coleção, data de referência, tuning), sem I/O e sem relógio
// de parede — a data entra como argumento para os testes serem determinísticos.
#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub approved: usize,
    pub rejected: usize,

    // Somas apenas sobre a partição aprovada
    pub total_revenue: Decimal,
    pub total_incentive: Decimal,

    // 0..=100, uma casa decimal; zero quando a coleção é vazia
    pub approval_rate: f64,

    // Receita aprovada / nº de aprovados; zero quando não há aprovados
    pub average_deal_size: Decimal,

    pub monthly_trend: Vec<MonthlyTrendEntry>,
    pub top_performers: Vec<TopPerformer>,
    pub tier: Tier,
}

#[derive(Clone)]
pub struct MetricsService {
    tuning: DashboardTuning,
}

impl MetricsService {
    pub fn new(tuning: DashboardTuning) -> Self {
        Self { tuning }
    }

    pub fn derive(&self, deals: &[Deal], reference: NaiveDate) -> DerivedMetrics {
        let total = deals.len();

        let mut pending = 0usize;
        let mut in_progress = 0usize;
        let mut approved = 0usize;
        let mut rejected = 0usize;
        let mut total_revenue = Decimal::ZERO;
        let mut total_incentive = Decimal::ZERO;

        for deal in deals {
            match deal.status {
                DealStatus::Pending => pending += 1,
                DealStatus::InProgress => in_progress += 1,
                DealStatus::Rejected => rejected += 1,
                DealStatus::Approved => {
                    approved += 1;
                    // Valores já chegam coagidos para Decimal na fronteira
                    // do fetch; aqui nunca aparece NaN.
                    total_revenue += deal.amount;
                    total_incentive += deal.incentive;
                }
            }
        }

        let approval_rate = if total > 0 {
            format::percent(approved as f64 * 100.0 / total as f64)
        } else {
            0.0
        };

        let average_deal_size = if approved > 0 {
            total_revenue / Decimal::from(approved as u64)
        } else {
            Decimal::ZERO
        };

        DerivedMetrics {
            total,
            pending,
            in_progress,
            approved,
            rejected,
            total_revenue,
            total_incentive,
            approval_rate,
            average_deal_size,
            monthly_trend: monthly_trend(deals, reference),
            top_performers: top_performers(deals),
            tier: Tier::from_revenue(total_revenue),
        }
    }

    // Deals acima do limiar configurado que ainda precisam de atenção
    // (qualquer status que não seja aprovado).
    pub fn high_value_attention(&self, deals: &[Deal]) -> usize {
        deals
            .iter()
            .filter(|d| d.amount > self.tuning.high_value_threshold && d.status != DealStatus::Approved)
            .count()
    }

    // Pendentes parados há mais dias que o limite configurado.
    // Deal sem data parseável nunca conta como parado.
    pub fn stale_pending(&self, deals: &[Deal], reference: NaiveDate) -> usize {
        deals
            .iter()
            .filter(|d| d.status == DealStatus::Pending)
            .filter(|d| match d.effective_day() {
                Some(day) => (reference - day).num_days() > self.tuning.stale_pending_days,
                None => false,
            })
            .count()
    }
}

// Os 6 ano-meses (YYYY-MM) que terminam no mês de referência, do mais antigo
// para o mais recente.
pub fn trailing_months(reference: NaiveDate) -> Vec<String> {
    (0..6)
        .rev()
        .map(|offset| {
            let mut year = reference.year();
            let mut month = reference.month() as i32 - offset;
            while month <= 0 {
                month += 12;
                year -= 1;
            }
            format!("{:04}-{:02}", year, month)
        })
        .collect()
}

// Série mensal de incentivos: sempre 6 buckets zero-filled; só deals
// aprovados com data dentro da janela somam. Datas não parseáveis já foram
// descartadas (com warning) na fronteira do fetch.
pub fn monthly_trend(deals: &[Deal], reference: NaiveDate) -> Vec<MonthlyTrendEntry> {
    let months = trailing_months(reference);
    let mut buckets: Vec<Decimal> = vec![Decimal::ZERO; months.len()];

    for deal in deals {
        if deal.status != DealStatus::Approved {
            continue;
        }
        let Some(year_month) = deal.year_month() else {
            continue;
        };
        if let Some(idx) = months.iter().position(|m| *m == year_month) {
            buckets[idx] += deal.incentive;
        }
    }

    months
        .into_iter()
        .zip(buckets)
        .map(|(month, incentive_sum)| MonthlyTrendEntry { month, incentive_sum })
        .collect()
}

// Ranking dos vendedores: agrupa aprovados por dono, soma incentivo e conta
// deals, ordena desc por incentivo (sort estável: empate mantém a ordem de
// primeira aparição) e corta no top 3. Deal sem dono fica de fora.
pub fn top_performers(deals: &[Deal]) -> Vec<TopPerformer> {
    struct Acc {
        id: i64,
        name: Option<String>,
        incentive: Decimal,
        deals: usize,
    }

    let mut stats: Vec<Acc> = Vec::new();

    for deal in deals {
        if deal.status != DealStatus::Approved {
            continue;
        }
        let Some(owner) = &deal.owner else {
            continue;
        };
        match stats.iter_mut().find(|s| s.id == owner.id) {
            Some(acc) => {
                acc.incentive += deal.incentive;
                acc.deals += 1;
                if acc.name.is_none() {
                    acc.name = owner.name.clone();
                }
            }
            None => stats.push(Acc {
                id: owner.id,
                name: owner.name.clone(),
                incentive: deal.incentive,
                deals: 1,
            }),
        }
    }

    stats.sort_by(|a, b| b.incentive.cmp(&a.incentive));
    stats.truncate(3);

    stats
        .into_iter()
        .map(|s| TopPerformer {
            name: s.name.unwrap_or_else(|| format!("User #{}", s.id)),
            deals: s.deals,
            incentive: s.incentive,
            incentive_display: format::full(s.incentive),
        })
        .collect()
}

// Filtro da tabela de transações: substring case-insensitive contra nome do
// cliente, status, valor como string e data formatada. Termo vazio casa tudo.
pub fn matches_search(deal: &Deal, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    if let Some(client) = &deal.client_name {
        if client.to_lowercase().contains(&term) {
            return true;
        }
    }
    if deal.status.label().to_lowercase().contains(&term) {
        return true;
    }
    if deal.amount.to_string().contains(&term) {
        return true;
    }
    if let Some(date) = &deal.effective_date {
        if format::day(date).contains(&term) {
            return true;
        }
    }
    false
}
