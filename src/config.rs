// src/config.rs

use std::env;
use std::sync::Arc;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    services::{DashboardService, MetricsService, PerformanceService},
    upstream::{DealsApiClient, DealsSource},
};

// Limiares operacionais da dashboard. O front original tinha "usuários
// inativos" e o corte de alto valor chumbados no código; aqui viram
// entradas de configuração com defaults equivalentes.
#[derive(Debug, Clone)]
pub struct DashboardTuning {
    // Deals acima deste valor e não aprovados pedem atenção
    pub high_value_threshold: Decimal,

    // Pendente há mais que isso (em dias) conta como gargalo de aprovação
    pub stale_pending_days: i64,

    // O upstream não expõe dados de atividade; o valor vem do ambiente
    pub inactive_user_count: usize,
}

impl Default for DashboardTuning {
    fn default() -> Self {
        Self {
            high_value_threshold: Decimal::from(500_000),
            stale_pending_days: 3,
            inactive_user_count: 0,
        }
    }
}

impl DashboardTuning {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            high_value_threshold: env_parsed("HIGH_VALUE_THRESHOLD", defaults.high_value_threshold),
            stale_pending_days: env_parsed("STALE_PENDING_DAYS", defaults.stale_pending_days),
            inactive_user_count: env_parsed("INACTIVE_USER_COUNT", defaults.inactive_user_count),
        }
    }
}

// Lê e parseia uma variável de ambiente; valor ausente ou inválido cai no
// default (com warning, para o operador perceber o typo).
fn env_parsed<T: FromStr + std::fmt::Debug>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("{} inválida ({:?}); usando default {:?}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub performance_service: PerformanceService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Base da API de deals; default de desenvolvimento quando não setada
        let base_url =
            env::var("DEALS_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let tuning = DashboardTuning::from_env();

        // Sem timeout configurado: espelha o comportamento do front
        // original (requisição pendurada deixa a view em loading).
        let http = reqwest::Client::builder().build()?;

        tracing::info!("✅ Cliente da API de deals apontando para {}", base_url);

        // --- Monta o gráfico de dependências ---
        let source: Arc<dyn DealsSource> = Arc::new(DealsApiClient::new(http, base_url));
        let metrics = MetricsService::new(tuning.clone());

        let dashboard_service =
            DashboardService::new(source.clone(), metrics.clone(), tuning.clone());
        let performance_service = PerformanceService::new(source, metrics);

        Ok(Self {
            dashboard_service,
            performance_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuning_default_espelha_o_front_original() {
        let tuning = DashboardTuning::default();
        assert_eq!(tuning.high_value_threshold, Decimal::from(500_000));
        assert_eq!(tuning.stale_pending_days, 3);
        assert_eq!(tuning.inactive_user_count, 0);
    }
}
