use chakra_config::PinataArgs;
use clap::Parser;

/// Arguments for the `auth` subcommand
#[derive(Debug, Clone, Parser)]
#[clap(about = "Checks that your Pinata credentials are accepted")]
pub struct AuthArgs {
    /// Pinata credentials and connection overrides
    #[clap(flatten)]
    pub pinata: PinataArgs,
}
