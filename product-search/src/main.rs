//! Product Search - HTTP API
//!
//! Entry point for the product search service.
//! Loads configuration, connects to OpenSearch and serves the product routes.

use std::process;

use tokio::net::TcpListener;
use tracing::{error, info};

use product_search::config::init_tracing;
use product_search::{build_router, Config, Dependencies, ServiceError};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    init_tracing(config.log_format);

    if let Err(e) = run(config).await {
        error!(error = %e, "Product search service failed");
        process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), ServiceError> {
    let dependencies = Dependencies::new(&config).await?;
    let router = build_router(dependencies.state);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!(addr = %config.server_addr, index = %config.index, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
