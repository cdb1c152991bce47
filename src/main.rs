use tracing_subscriber::EnvFilter;

use orienta::api::{self, ApiContext};
use orienta::config::{self, AppConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let app_config = AppConfig::from_env();
    tracing::info!(
        "{} starting v{}, model {} at {}",
        config::APP_NAME,
        config::APP_VERSION,
        app_config.model,
        app_config.api_base,
    );
    if app_config.api_key.is_none() {
        tracing::warn!(
            "ORIENTA_API_KEY is not set — report and chat endpoints will answer 503"
        );
    }

    let bind_addr = app_config.bind_addr;
    let ctx = ApiContext::from_config(app_config);

    let mut server = match api::server::start(ctx, bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(addr = %server.addr, "listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
    server.join().await;
}
