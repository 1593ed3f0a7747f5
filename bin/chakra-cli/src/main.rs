//! chakra: pins the images and metadata of the chakra NFT collection to IPFS through Pinata.

pub(crate) mod args;

use std::process::ExitCode;

use args::{Arguments, Subcommands};
use chakra_config::Configuration;
use clap::Parser;
use eyre::Result;

const RED_ANSI_COLOR: &str = "\x1b[31m";
const RESET_ANSI_COLOR: &str = "\x1b[0m";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // parse command line arguments
    let args = Arguments::parse();

    // init tracing. the guard flushes the log file when main returns
    let _guard = args.logs.init_tracing()?;

    // credentials are only needed, and only loaded, by the subcommands that talk to pinata
    match args.sub {
        Subcommands::Config(subargs) => chakra_config::config(subargs)?,
        Subcommands::Upload(subargs) => {
            let report = chakra_upload::upload(subargs, &Configuration::load()?).await?;
            if !report.is_success() {
                eprint!("{RED_ANSI_COLOR}Error: {RESET_ANSI_COLOR}{}", report.failure_summary());
                return Ok(ExitCode::FAILURE);
            }
        }
        Subcommands::Pin(subargs) => {
            let response = chakra_pin::pin(subargs, &Configuration::load()?).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Subcommands::Auth(subargs) => chakra_auth::auth(subargs, &Configuration::load()?).await?,
    };

    Ok(ExitCode::SUCCESS)
}
