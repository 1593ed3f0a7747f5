use std::path::PathBuf;

use chakra_common::{AssetLayout, PinOptionArgs, CHAKRAS};
use chakra_config::PinataArgs;
use clap::Parser;

/// Arguments for the `upload` subcommand
#[derive(Debug, Clone, Parser)]
#[clap(about = "Pins the image and metadata of every chakra to IPFS")]
pub struct UploadArgs {
    /// Token names, in token id order. The position of a name decides the remote filenames
    /// (`<position>.png`, `<position>.json`), so reordering changes what gets pinned where.
    #[clap(long, value_delimiter = ',', default_values_t = CHAKRAS.map(String::from).to_vec())]
    pub names: Vec<String>,

    /// Directory holding `<prefix>-<name>.png`.
    #[clap(long, default_value = "./img")]
    pub image_dir: PathBuf,

    /// Directory holding `<prefix>-<name>.json`.
    #[clap(long, default_value = "./metadata")]
    pub metadata_dir: PathBuf,

    /// Filename prefix shared by all assets.
    #[clap(long, default_value = "chakra")]
    pub prefix: String,

    /// Write a JSON manifest of every outcome to this file.
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Pinata metadata and pin options, applied to every file
    #[clap(flatten)]
    pub options: PinOptionArgs,

    /// Pinata credentials and connection overrides
    #[clap(flatten)]
    pub pinata: PinataArgs,
}

impl UploadArgs {
    /// The asset layout described by the arguments.
    pub fn layout(&self) -> AssetLayout {
        AssetLayout {
            image_dir: self.image_dir.clone(),
            metadata_dir: self.metadata_dir.clone(),
            prefix: self.prefix.clone(),
        }
    }
}
