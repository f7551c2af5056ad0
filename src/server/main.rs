use anyhow::Context;
use todo_board::adapters::{router, HttpConfig, HttpServer};
use todo_board::app;
use todo_board::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = AppConfig::from_env()?;
    let today = chrono::Local::now().date_naive();
    let service = app::prepare(&config, today)
        .await
        .context("startup failed, not serving requests")?;

    let http_config = HttpConfig {
        cors_origins: config.cors_origins.clone(),
    };
    let router = router(service, &http_config)?;
    let server = HttpServer::bind(router, config.addr()).await?;
    server.run().await
}
