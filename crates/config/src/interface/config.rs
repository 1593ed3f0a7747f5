#![allow(deprecated)]
use std::{
    env::home_dir,
    io::Write,
    path::{Path, PathBuf},
};

use crate::constants::{GREEN_ANSI_COLOR, PURPLE_ANSI_COLOR, RESET_ANSI_COLOR};
use chakra_common::{constants::DEFAULT_GATEWAY_URL, Credentials, PinError};
use eyre::{eyre, OptionExt, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The [`Configuration`] struct represents the configuration of the CLI.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// The Pinata API key, `PINATA_API_KEY` in the environment.
    pub pinata_api_key: Option<String>,

    /// The Pinata secret API key, `PINATA_API_SECRET` in the environment.
    pub pinata_api_secret: Option<String>,

    /// The gateway used to build links to pinned content.
    pub ipfs_gateway_url: Option<String>,
}

impl Configuration {
    /// Returns the current configuration.
    ///
    /// A `.env` file in the working directory is loaded into the environment first. Values
    /// from `~/.chakra/config.json` (if it exists) are then overridden by the environment.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("loaded environment from {}", path.display());
        }

        let file_config = Self::from_file(&Self::path()?)?.unwrap_or_default();
        Ok(file_config.merge(Self::load_from_env()?))
    }

    /// The location of the configuration file.
    pub fn path() -> Result<PathBuf> {
        let mut config_path = home_dir().ok_or_eyre("failed to get home directory")?;
        config_path.push(".chakra");
        config_path.push("config.json");
        Ok(config_path)
    }

    /// Reads a configuration file, returning `None` if it does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!("no configuration file at {}", path.display());
            return Ok(None);
        }

        let config = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&config)
            .map_err(|e| eyre!("invalid configuration file {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    /// Loads configuration from env with envy
    fn load_from_env() -> Result<Self> {
        envy::from_env::<Configuration>().map_err(Into::into)
    }

    /// Returns `self` with every value set in `overrides` replaced.
    pub fn merge(self, overrides: Self) -> Self {
        Configuration {
            pinata_api_key: overrides.pinata_api_key.or(self.pinata_api_key),
            pinata_api_secret: overrides.pinata_api_secret.or(self.pinata_api_secret),
            ipfs_gateway_url: overrides.ipfs_gateway_url.or(self.ipfs_gateway_url),
        }
    }

    /// The Pinata credentials. Fails if either half of the key pair is missing.
    pub fn credentials(&self) -> Result<Credentials, PinError> {
        let api_key = self.pinata_api_key.as_deref().ok_or_else(|| {
            PinError::Configuration(
                "PINATA_API_KEY is not set. Export it, add it to .env, or run `chakra config pinata_api_key <KEY>`".to_string(),
            )
        })?;
        let api_secret = self.pinata_api_secret.as_deref().ok_or_else(|| {
            PinError::Configuration(
                "PINATA_API_SECRET is not set. Export it, add it to .env, or run `chakra config pinata_api_secret <SECRET>`".to_string(),
            )
        })?;

        Credentials::new(api_key, api_secret)
    }

    /// The configured gateway, or Pinata's public gateway.
    pub fn gateway_url(&self) -> &str {
        self.ipfs_gateway_url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL)
    }

    /// A copy safe to print: the secret is masked.
    pub fn redacted(&self) -> Self {
        Configuration {
            pinata_api_secret: self.pinata_api_secret.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }

    /// Saves the configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // build the directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = serde_json::to_string_pretty(self)?;
        std::fs::write(path, config)?;

        Ok(())
    }

    /// Set a value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "pinata_api_key" => self.pinata_api_key = Some(value.to_string()),
            "pinata_api_secret" => self.pinata_api_secret = Some(value.to_string()),
            "ipfs_gateway_url" => self.ipfs_gateway_url = Some(value.to_string()),
            _ => return Err(eyre!("invalid key '{}'", key)),
        };

        Ok(())
    }

    /// Starts blocking interactive mode for configuration.
    pub fn from_interactive() -> Result<Self> {
        let path = Self::path()?;
        let mut config = Self::from_file(&path)?.unwrap_or_default();
        let input = &mut String::new();

        println!(
            "{PURPLE_ANSI_COLOR}Welcome to the chakra configuration wizard!{RESET_ANSI_COLOR}\n\nI'll help walk you through configuring the CLI. If you wish to use an existing configuration value, just press enter.\nYou can exit this wizard at any time by pressing `Ctrl+C`.\n",
        );

        let prompts = [
            ("pinata_api_key", "Set a new Pinata API key", config.pinata_api_key.clone()),
            ("pinata_api_secret", "Set a new Pinata API secret", config.redacted().pinata_api_secret),
            ("ipfs_gateway_url", "Set a new IPFS gateway URL", config.ipfs_gateway_url.clone()),
        ];

        for (step, (key, text, current)) in prompts.into_iter().enumerate() {
            print!("{GREEN_ANSI_COLOR}{}.{RESET_ANSI_COLOR} {} (default: {:?}): ", step + 1, text, current);
            std::io::stdout().flush()?;
            input.clear();
            std::io::stdin().read_line(input)?;
            if !input.trim().is_empty() {
                config.set(key, input.trim())?;
            }
        }

        println!(
            "\n{GREEN_ANSI_COLOR}Configuration set!{RESET_ANSI_COLOR}\n{}",
            serde_json::to_string_pretty(&config.redacted())?
        );

        config.save_to(&path)?;

        Ok(config)
    }
}
