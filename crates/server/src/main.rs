use std::sync::Arc;

use server::state::{build_service, AppState};

#[tokio::main]
async fn main() {
    server::telemetry::init_tracing();

    let config = server::config::load_config().clone();
    if config.features.telemetry {
        server::telemetry::init_telemetry();
    }
    server::health::record_start_time();

    let service = Arc::new(build_service(config.clone()).expect("Failed to build case service"));
    let _auto_refresh = server::service::spawn_auto_refresh(service.clone());

    let router = server::openapi::app_router(AppState::new(service), &config.features);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(
        addr = %config.server.bind_addr,
        version = env!("CARGO_PKG_VERSION"),
        "casetrack listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    server::telemetry::shutdown_telemetry();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
