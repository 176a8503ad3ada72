//src/main.rs

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod services;
mod upstream;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Rotas do Admin Control Center
    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route(
            "/status-distribution",
            get(handlers::dashboard::get_status_distribution),
        )
        .route(
            "/top-performers",
            get(handlers::dashboard::get_top_performers),
        );

    // Rotas de performance por executivo
    let performance_routes = Router::new()
        .route("/{user_id}", get(handlers::performance::get_performance))
        .route(
            "/{user_id}/deals",
            get(handlers::performance::list_user_deals),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/performance", performance_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
