// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A política geral é degradar (view zerada, perfil substituto) em vez de
// propagar: estas variantes cobrem o que sobra quando degradar não faz sentido.
#[derive(Debug, Error)]
pub enum AppError {
    // Falha de transporte/servidor ao consultar a API de deals
    #[error("Falha ao consultar a API de deals: {0}")]
    Upstream(#[from] reqwest::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Upstream(ref e) => {
                tracing::error!("Upstream indisponível: {}", e);
                (StatusCode::BAD_GATEWAY, "Serviço de deals indisponível.")
            }

            // Todos os outros erros viram 500. O `tracing` vai logar a
            // mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
