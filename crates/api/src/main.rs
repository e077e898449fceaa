use std::sync::Arc;

#[tokio::main]
async fn main() {
    cuehall_observability::init();

    let config = cuehall_api::config::AppConfig::from_env();
    let services = Arc::new(cuehall_api::app::services::build_services(&config));
    let app = cuehall_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
