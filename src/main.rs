//! Greenchoice portal client
//!
//! Logs in to mijn.greenchoice.nl and prints either the account's agreements
//! (no `GREENCHOICE_AGREEMENT_ID` set) or the current meter readings and
//! tariffs of one agreement as JSON.
//!
//! Runs once and exits; schedule it externally for periodic readings.

use anyhow::Context;
use greenchoice_client::app;
use greenchoice_client::config::{self, PortalConfig, RequestConfig};
use greenchoice_client::error;
use greenchoice_client::portal::RetrievalEngine;

fn load_portal_configs() -> error::Result<(PortalConfig, RequestConfig)> {
    Ok((config::load_portal_config()?, config::load_request_config()?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_app_config().context("Failed to load AppConfig")?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .with_writer(std::io::stderr)
        .init();

    let (portal_config, request_config) =
        load_portal_configs().context("Failed to load portal configuration")?;
    tracing::debug!("Portal configuration: {:?}", portal_config);

    let mut engine = RetrievalEngine::from_config(&portal_config, request_config)
        .context("Invalid portal configuration")?;

    let stdout = std::io::stdout();
    app::run(&mut engine, portal_config.agreement_id, &mut stdout.lock()).await
}
