// src/upstream/deals_api.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    models::deal::{Deal, RawDeal, RawUserProfile, UserProfile},
};

// A fonte de dados da dashboard. Trait para podermos plugar um stub nos
// testes dos serviços sem subir servidor nenhum.
#[async_trait]
pub trait DealsSource: Send + Sync {
    // Coleção completa de deals, ordenada por data efetiva (desc)
    async fn fetch_all_deals(&self) -> Result<Vec<Deal>, AppError>;

    // Coleção escopada por usuário. Estratégia em dois passos:
    // 1. query com `userId` na API;
    // 2. se falhar, busca tudo e filtra localmente com `owned_by`.
    async fn fetch_deals_for_user(&self, user_id: i64) -> Result<Vec<Deal>, AppError>;

    // Perfil do usuário. Nunca falha: qualquer erro vira o perfil substituto.
    async fn fetch_user_profile(&self, user_id: i64) -> UserProfile;
}

// Cliente HTTP da API de deals (o "repositório" deste sistema:
// não há banco, o dado mora no serviço upstream).
#[derive(Clone)]
pub struct DealsApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl DealsApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    async fn get_deals(&self, url: &str) -> Result<Vec<Deal>, AppError> {
        let raw: Vec<RawDeal> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut deals: Vec<Deal> = raw.into_iter().map(Deal::from_raw).collect();
        sort_by_effective_date_desc(&mut deals);
        Ok(deals)
    }
}

#[async_trait]
impl DealsSource for DealsApiClient {
    async fn fetch_all_deals(&self) -> Result<Vec<Deal>, AppError> {
        self.get_deals(&format!("{}/deals", self.base_url)).await
    }

    async fn fetch_deals_for_user(&self, user_id: i64) -> Result<Vec<Deal>, AppError> {
        let scoped_url = format!("{}/deals?userId={}", self.base_url, user_id);

        match self.get_deals(&scoped_url).await {
            Ok(deals) => Ok(deals),
            Err(e) => {
                // Passo 2: busca a coleção inteira e filtra localmente
                tracing::warn!(
                    "Query escopada por usuário {} falhou ({}); usando fallback local",
                    user_id,
                    e
                );
                let mut all = self.fetch_all_deals().await?;
                all.retain(|d| owned_by(d, user_id));
                Ok(all)
            }
        }
    }

    async fn fetch_user_profile(&self, user_id: i64) -> UserProfile {
        let url = format!("{}/api/users/{}", self.base_url, user_id);

        let result: Result<RawUserProfile, reqwest::Error> = async {
            self.http
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await
        }
        .await;

        match result {
            Ok(raw) => raw.into(),
            Err(e) => {
                tracing::warn!("Perfil do usuário {} indisponível ({}); usando substituto", user_id, e);
                UserProfile::placeholder()
            }
        }
    }
}

// Predicado do fallback: o deal pertence ao usuário? Cobre tanto a
// referência aninhada (`user.id`) quanto a chave achatada (`userId`),
// já resolvidas em `Deal::owner` na fronteira do fetch.
pub fn owned_by(deal: &Deal, user_id: i64) -> bool {
    deal.owner.as_ref().is_some_and(|o| o.id == user_id)
}

// Ordena por data efetiva decrescente; deal sem data parseável conta
// como o mais antigo. Sort estável preserva a ordem de chegada em empates.
pub fn sort_by_effective_date_desc(deals: &mut [Deal]) {
    deals.sort_by_key(|d| {
        std::cmp::Reverse(d.effective_date.unwrap_or(DateTime::<Utc>::MIN_UTC))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::deal::DealStatus;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> DealsApiClient {
        DealsApiClient::new(reqwest::Client::new(), server.uri())
    }

    #[tokio::test]
    async fn busca_escopada_usa_query_param() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deals"))
            .and(query_param("userId", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "status": "approved", "amount": 1000, "incentive": 100,
                  "date": "2024-01-10", "user": { "id": 7, "name": "Ana" } }
            ])))
            .mount(&server)
            .await;

        let deals = client(&server).fetch_deals_for_user(7).await.unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].status, DealStatus::Approved);
    }

    #[tokio::test]
    async fn fallback_filtra_localmente_quando_query_falha() {
        let server = MockServer::start().await;

        // A query escopada quebra...
        Mock::given(method("GET"))
            .and(path("/deals"))
            .and(query_param("userId", "7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // ...então caímos na coleção completa e filtramos pelo dono
        Mock::given(method("GET"))
            .and(path("/deals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "user": { "id": 7 }, "date": "2024-01-05" },
                { "id": 2, "userId": 7, "date": "2024-02-05" },
                { "id": 3, "user": { "id": 9 }, "date": "2024-03-05" },
                { "id": 4 }
            ])))
            .mount(&server)
            .await;

        let deals = client(&server).fetch_deals_for_user(7).await.unwrap();
        let ids: Vec<_> = deals.iter().map(|d| d.id.unwrap()).collect();
        // Referência aninhada E chave achatada contam; sem dono fica de fora.
        // Ordenado por data efetiva desc.
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn ordena_por_data_efetiva_desc_com_sem_data_por_ultimo() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "date": "2024-01-01" },
                { "id": 2 },
                { "id": 3, "createdAt": "2024-03-01T08:00:00Z" },
                { "id": 4, "date": "2024-02-01" }
            ])))
            .mount(&server)
            .await;

        let deals = client(&server).fetch_all_deals().await.unwrap();
        let ids: Vec<_> = deals.iter().map(|d| d.id.unwrap()).collect();
        assert_eq!(ids, vec![3, 4, 1, 2]);
    }

    #[tokio::test]
    async fn perfil_indisponivel_vira_substituto() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let profile = client(&server).fetch_user_profile(7).await;
        assert_eq!(profile.name, "Sales Executive");
        assert_eq!(profile.email, "");
    }

    #[tokio::test]
    async fn perfil_ok_e_parseado() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Ana Souza", "email": "ana@empresa.com"
            })))
            .mount(&server)
            .await;

        let profile = client(&server).fetch_user_profile(7).await;
        assert_eq!(profile.name, "Ana Souza");
        assert_eq!(profile.email, "ana@empresa.com");
    }

    #[test]
    fn owned_by_ignora_deal_sem_dono() {
        let raw: RawDeal = serde_json::from_str(r#"{"id":1}"#).unwrap();
        let deal = Deal::from_raw(raw);
        assert!(!owned_by(&deal, 7));
    }
}
