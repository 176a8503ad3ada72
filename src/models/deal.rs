// src/models/deal.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use utoipa::ToSchema;

// --- ENUMS ---

// Status fechado do ciclo de vida do deal.
// A API upstream manda string livre (case-insensitive); a normalização
// acontece aqui, na fronteira do fetch. Qualquer valor não reconhecido
// cai em Pending para fins de exibição.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStatus {
    Pending,
    InProgress,
    Approved,
    Rejected,
}

impl DealStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("").trim().to_lowercase().as_str() {
            "approved" => DealStatus::Approved,
            "rejected" => DealStatus::Rejected,
            "in_progress" => DealStatus::InProgress,
            // "submitted" e "pending" são o mesmo balde; desconhecido idem.
            _ => DealStatus::Pending,
        }
    }

    // Rótulo usado na tabela de transações (badge em caixa alta)
    pub fn label(&self) -> &'static str {
        match self {
            DealStatus::Pending => "PENDING",
            DealStatus::InProgress => "IN_PROGRESS",
            DealStatus::Approved => "APPROVED",
            DealStatus::Rejected => "REJECTED",
        }
    }

    // Nome amigável usado nas fatias do gráfico de distribuição
    pub fn display_name(&self) -> &'static str {
        match self {
            DealStatus::Pending => "Pending",
            DealStatus::InProgress => "In Progress",
            DealStatus::Approved => "Approved",
            DealStatus::Rejected => "Rejected",
        }
    }
}

// --- SHAPE CRU DA API UPSTREAM ---

// O registro como chega da API de deals: campos opcionais, valores
// monetários que podem vir como número OU string, referência de usuário
// aninhada (`user.id`) ou chave estrangeira achatada (`userId`).
// Tudo aqui usa `default` de propósito: campo faltando nunca derruba o parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeal {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub client_name: Option<String>,

    #[serde(default)]
    pub amount: Value,

    #[serde(default)]
    pub incentive: Value,

    #[serde(default)]
    pub status: Option<String>,

    // Data explícita do deal (pode ser YYYY-MM-DD ou timestamp RFC 3339)
    #[serde(default)]
    pub date: Option<String>,

    // Fallback quando `date` não existe
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub user: Option<RawOwner>,

    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub rejection_reason: Option<String>,

    #[serde(default)]
    pub paid: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOwner {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: Option<String>,
}

// --- MODELO VALIDADO ---

// Dono do deal, já resolvido (objeto aninhado OU chave achatada).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealOwner {
    pub id: i64,
    pub name: Option<String>,
}

// O deal depois da fronteira de validação: status fechado, dinheiro em
// Decimal (nunca NaN), data efetiva já resolvida e parseada.
#[derive(Debug, Clone)]
pub struct Deal {
    pub id: Option<i64>,
    pub client_name: Option<String>,
    pub amount: Decimal,
    pub incentive: Decimal,
    pub status: DealStatus,
    pub effective_date: Option<DateTime<Utc>>,
    pub owner: Option<DealOwner>,
    pub rejection_reason: Option<String>,
    pub paid: bool,
}

impl Deal {
    pub fn from_raw(raw: RawDeal) -> Self {
        // Mesma precedência do front original: `date` vence `createdAt`.
        let raw_date = raw
            .date
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| raw.created_at.clone().filter(|s| !s.trim().is_empty()));

        let effective_date = match raw_date.as_deref() {
            Some(s) => {
                let parsed = parse_effective_date(s);
                if parsed.is_none() {
                    // Não é fatal: o deal continua contando nos totais, só
                    // fica de fora da série mensal e ordena como o mais antigo.
                    tracing::warn!("Formato de data inválido no deal {:?}: {:?}", raw.id, s);
                }
                parsed
            }
            None => None,
        };

        let owner = raw
            .user
            .as_ref()
            .and_then(|u| u.id.map(|id| DealOwner { id, name: u.name.clone() }))
            .or(raw.user_id.map(|id| DealOwner { id, name: None }));

        Self {
            id: raw.id,
            client_name: raw.client_name,
            amount: coerce_decimal(&raw.amount),
            incentive: coerce_decimal(&raw.incentive),
            status: DealStatus::parse(raw.status.as_deref()),
            effective_date,
            owner,
            rejection_reason: raw.rejection_reason,
            paid: raw.paid.unwrap_or(false),
        }
    }

    pub fn effective_day(&self) -> Option<NaiveDate> {
        self.effective_date.map(|d| d.date_naive())
    }

    // Chave ano-mês (YYYY-MM) usada nos buckets da série mensal
    pub fn year_month(&self) -> Option<String> {
        self.effective_date.map(|d| d.format("%Y-%m").to_string())
    }
}

// Coage um valor JSON qualquer para Decimal. Número ou string numérica
// viram o valor; qualquer outra coisa (null, "abc", objeto) vira zero,
// para que um campo malformado nunca propague NaN para as somas.
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .unwrap_or(Decimal::ZERO)
        }
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .unwrap_or(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

// Aceita timestamp RFC 3339, data simples (YYYY-MM-DD) ou datetime sem fuso.
pub fn parse_effective_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    None
}

// --- PERFIL DE USUÁRIO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(example = "Rakesh Sharma")]
    pub name: String,

    #[schema(example = "rakesh@empresa.com")]
    pub email: String,
}

impl UserProfile {
    // Perfil substituto quando a busca falha: a view degrada, não quebra.
    pub fn placeholder() -> Self {
        Self {
            name: "Sales Executive".to_string(),
            email: String::new(),
        }
    }
}

// Shape cru do endpoint de usuário (campos podem faltar)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserProfile {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl From<RawUserProfile> for UserProfile {
    fn from(raw: RawUserProfile) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| "Unknown User".to_string()),
            email: raw.email.unwrap_or_default(),
        }
    }
}
