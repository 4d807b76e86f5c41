use std::sync::Arc;

use orchestrator::http::{self, AppState};
use orchestrator::{Admission, Config, Orchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Arc::new(Config::from_env()?);
    tracing::info!(namespace = %config.namespace, port = config.api_port, "starting xrpl-mint-burn");

    let http_client = reqwest::Client::new();

    let mongo_client = mongodb::Client::with_uri_str(&config.document_store_uri).await?;
    let database = mongo_client.database(&config.document_store_database);
    let store = Arc::new(store::Store::new(database));

    let kms_pem = tokio::fs::read(&config.kms_api_secret_path).await?;
    let kms = Arc::new(kms_client::KmsClient::new(
        http_client.clone(),
        config.kms_base_url.clone(),
        &kms_pem,
        config.kms_api_key.clone(),
    )?);

    let node = Arc::new(xrpl_client::XrplNodeClient::new(http_client, config.xrpl_node_url.clone()));

    let admission = Admission::new();
    let orchestrator = Arc::new(Orchestrator::new(store.clone(), kms, node, config.clone(), admission));

    let app = http::router(AppState { orchestrator, store });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.api_port)).await?;
    tracing::info!(port = config.api_port, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
