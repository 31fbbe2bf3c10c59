use dotenvy::dotenv;
use leadstake::{
    api::ApiClient,
    config,
    errors::{Error, Result},
    session::AllocationSession,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Build the API client
    let api = ApiClient::new(&app_config)
        .inspect_err(|e| error!("Failed to build API client: {e}"))?;

    // 5. Fetch the lead named on the command line plus the investor directory
    let lead_id = env::args().nth(1).ok_or_else(|| Error::Config {
        message: "usage: leadstake <lead-id>".to_string(),
    })?;

    let investors = api
        .list_investors()
        .await
        .inspect(|list| info!("Fetched {} investors from the directory.", list.len()))
        .inspect_err(|e| error!("Failed to fetch investor directory: {e}"))?;

    let lead = api
        .get_lead(&lead_id)
        .await
        .inspect_err(|e| error!("Failed to fetch lead {lead_id}: {e}"))?;

    // 6. Report the lead's funding position
    let session = AllocationSession::new(api, &lead, investors, app_config.debounce_delay());
    let stats = session.stats().await;
    info!(
        lead_id = %lead.id,
        "Funding: {:.2}% allocated (${:.2} of ${:.2}), {} investor(s), ${:.2} remaining",
        stats.allocated_percentage,
        stats.allocated_amount,
        session.purchase_price().await,
        stats.investor_count,
        stats.remaining_amount,
    );

    session.shutdown().await;
    Ok(())
}
