use savor_safari::auth::TokenSigner;
use savor_safari::config::Config;
use savor_safari::http::{self, AppState};
use savor_safari::lifecycle::{setup_tracing, MarketSystem};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = Config::load().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(address = %config.address(), buffer = config.actor_buffer, "Starting SavorSafari server");

    let system = MarketSystem::new(config.actor_buffer);
    if let Some(path) = &config.seed_file {
        system.seed_from_file(path).await?;
    }

    let signer = TokenSigner::new(config.token_secret.clone(), config.token_ttl());
    let state = AppState::new(
        system.listing_client.clone(),
        system.purchase_client.clone(),
        signer,
    );

    let listener = TcpListener::bind(config.address()).await?;
    http::serve(listener, state).await?;

    system.shutdown().await?;
    Ok(())
}
