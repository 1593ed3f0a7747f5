use std::path::PathBuf;

use chakra_common::{PinError, PinOptionArgs, UploadRequest};
use chakra_config::PinataArgs;
use clap::Parser;

/// Arguments for the `pin` subcommand
#[derive(Debug, Clone, Parser)]
#[clap(about = "Pins a single file, or every file in a directory, to IPFS")]
pub struct PinArgs {
    /// The file or directory to pin. Directories are walked recursively and pinned as one unit.
    pub path: PathBuf,

    /// The filename to pin a single file under. Defaults to the local filename.
    #[clap(long, short = 'n')]
    pub remote_name: Option<String>,

    /// A human readable name for the pin, shown in the Pinata dashboard.
    #[clap(long)]
    pub name: Option<String>,

    /// Wrap the pinned content in a directory.
    #[clap(long)]
    pub wrap_with_directory: bool,

    /// Pinata metadata and pin options
    #[clap(flatten)]
    pub options: PinOptionArgs,

    /// Pinata credentials and connection overrides
    #[clap(flatten)]
    pub pinata: PinataArgs,
}

impl PinArgs {
    /// Builds the [`UploadRequest`] described by the arguments.
    pub fn request(&self) -> Result<UploadRequest, PinError> {
        let mut options = self.options.to_pin_options()?;
        if let Some(name) = &self.name {
            options = options.with_name(name.clone());
        }
        if self.wrap_with_directory {
            options = options.with_wrap_with_directory(true);
        }

        let mut request = UploadRequest::new(&self.path);
        if let Some(remote_name) = &self.remote_name {
            request = request.with_remote_name(remote_name.clone());
        }
        if options.is_empty() {
            Ok(request)
        } else {
            Ok(request.with_options(options))
        }
    }
}
