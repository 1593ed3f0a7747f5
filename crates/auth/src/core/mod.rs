use chakra_config::Configuration;
use eyre::{eyre, Result};
use pinata_sdk::PinataApi;
use tracing::info;

use crate::AuthArgs;

/// The `auth` subcommand. Calls Pinata's authentication test endpoint with the configured
/// credentials.
pub async fn auth(args: AuthArgs, config: &Configuration) -> Result<()> {
    let config = config.clone().merge(args.pinata.overrides());
    let credentials = config.credentials()?;

    let api = PinataApi::new(credentials.api_key(), credentials.api_secret())
        .map_err(|e| eyre!("Failed to create Pinata API client: {}", e))?;

    info!("testing Pinata credentials for API key {}", credentials.api_key());
    api.test_authentication()
        .await
        .map_err(|e| eyre!("Pinata rejected the credentials: {}", e))?;

    info!("Pinata accepted the credentials");

    Ok(())
}
