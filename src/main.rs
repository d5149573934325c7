use anyhow::Context;
use car_inventory_api::{
    app,
    config::Config,
    constants::API_NAME,
    repository,
    service::{CarService, ListPolicy},
};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting car inventory server on port {}", API_NAME, config.server_port);

    let store = match repository::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("{} Failed to open car store: {:#}", API_NAME, e);
            return Err(e);
        }
    };

    let service = CarService::new(store, ListPolicy::new(config.filter_keys.clone()));
    let router = app(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
