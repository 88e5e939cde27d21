use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{error, info};

use tuitionhub::logging::{init_tracing, shutdown_tracer};
use tuitionhub::metrics::{init_metrics, metrics_app};
use tuitionhub::router::init_router;
use tuitionhub::state::init_app_state;
use tuitionhub_db::run_migrations;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = init_app_state().await;
    run_migrations(&state.db).await?;

    match init_metrics() {
        Ok(Some(handle)) => {
            let metrics_addr = state.server_config.metrics_addr();
            let listener = TcpListener::bind(&metrics_addr).await?;
            info!("📈 Metrics available at http://{}/metrics", metrics_addr);
            tokio::spawn(async move {
                if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                    error!(error = %e, "Metrics server stopped");
                }
            });
        }
        Ok(None) => info!("Observability disabled, metrics server not started"),
        Err(e) => error!(error = %e, "Failed to install Prometheus recorder"),
    }

    let addr = state.server_config.addr();
    let app = init_router(state);
    let listener = TcpListener::bind(&addr).await?;

    println!("🚀 Server running on http://{}", addr);
    println!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    println!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
