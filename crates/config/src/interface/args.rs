use chakra_common::constants::DEFAULT_TIMEOUT_SECS;
use clap::{Args, Parser};

use crate::Configuration;

/// Arguments for the `config` subcommand
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display or edit your chakra CLI configuration.",
    override_usage = "chakra config [OPTIONS] [KEY] [VALUE]"
)]
pub struct ConfigArgs {
    /// The target key to update: `pinata_api_key`, `pinata_api_secret` or `ipfs_gateway_url`.
    #[clap(required = false, default_value = "", hide_default_value = true)]
    pub key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "", hide_default_value = true)]
    pub value: String,

    /// Whether to enter interactive mode.
    #[clap(long, short)]
    pub interactive: bool,
}

/// Pinata connection flags shared by the subcommands that talk to Pinata. Values given here
/// take precedence over the environment and the configuration file.
#[derive(Debug, Clone, Args)]
#[clap(next_help_heading = "PINATA")]
pub struct PinataArgs {
    /// Your Pinata API key.
    #[clap(long, required = false)]
    pub pinata_api_key: Option<String>,

    /// Your Pinata secret API key.
    #[clap(long, required = false)]
    pub pinata_api_secret: Option<String>,

    /// The IPFS gateway used when displaying links to pinned content.
    #[clap(long, required = false)]
    pub ipfs_gateway_url: Option<String>,

    /// Request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl PinataArgs {
    /// The flags as a [`Configuration`] layer, to be merged over the loaded configuration.
    pub fn overrides(&self) -> Configuration {
        Configuration {
            pinata_api_key: self.pinata_api_key.clone(),
            pinata_api_secret: self.pinata_api_secret.clone(),
            ipfs_gateway_url: self.ipfs_gateway_url.clone(),
        }
    }
}

impl Default for PinataArgs {
    fn default() -> Self {
        Self {
            pinata_api_key: None,
            pinata_api_secret: None,
            ipfs_gateway_url: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}
