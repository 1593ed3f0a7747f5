use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{PinOptions, UploadRequest};

/// The chakra token names, in token id order.
pub const CHAKRAS: [&str; 7] = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];

/// Which file of an [`Asset`] pair is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// The PNG image
    Image,
    /// The JSON metadata document
    Metadata,
}

impl AssetKind {
    /// The file extension used for this kind, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Image => "png",
            AssetKind::Metadata => "json",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Metadata => write!(f, "metadata"),
        }
    }
}

/// Where the asset files live on disk and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    /// Directory holding `<prefix>-<name>.png`
    pub image_dir: PathBuf,
    /// Directory holding `<prefix>-<name>.json`
    pub metadata_dir: PathBuf,
    /// Filename prefix shared by all assets
    pub prefix: String,
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("./img"),
            metadata_dir: PathBuf::from("./metadata"),
            prefix: "chakra".to_string(),
        }
    }
}

impl AssetLayout {
    /// A layout rooted at `root`, i.e. `root/img` and `root/metadata`.
    pub fn rooted_at(root: &Path) -> Self {
        Self { image_dir: root.join("img"), metadata_dir: root.join("metadata"), ..Self::default() }
    }

    /// The local filename of `name`'s file of the given kind, e.g. `chakra-red.png`.
    pub fn file_name(&self, name: &str, kind: AssetKind) -> String {
        format!("{}-{}.{}", self.prefix, name, kind.extension())
    }

    /// Enumerates the assets for `names`. Each call starts over from the first name.
    pub fn assets<'a, S: AsRef<str>>(&'a self, names: &'a [S]) -> AssetEnumerator<'a, S> {
        AssetEnumerator { layout: self, names, position: 0 }
    }

    fn asset(&self, index: usize, name: &str) -> Asset {
        Asset {
            name: name.to_string(),
            index,
            image_path: self.image_dir.join(self.file_name(name, AssetKind::Image)),
            metadata_path: self.metadata_dir.join(self.file_name(name, AssetKind::Metadata)),
        }
    }
}

/// One named token: an image and its metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The token name, e.g. `red`
    pub name: String,
    /// Zero-based position of the name in the list. The remote filenames are derived from it
    /// so that on-chain token ids line up with the IPFS object names.
    pub index: usize,
    /// Local path of the image
    pub image_path: PathBuf,
    /// Local path of the metadata document
    pub metadata_path: PathBuf,
}

impl Asset {
    /// The local path of the file of the given kind.
    pub fn path(&self, kind: AssetKind) -> &Path {
        match kind {
            AssetKind::Image => &self.image_path,
            AssetKind::Metadata => &self.metadata_path,
        }
    }

    /// The filename under which the file of the given kind is pinned, e.g. `0.png`.
    pub fn remote_name(&self, kind: AssetKind) -> String {
        format!("{}.{}", self.index, kind.extension())
    }

    /// Builds the upload request for the file of the given kind.
    pub fn upload_request(&self, kind: AssetKind, options: Option<PinOptions>) -> UploadRequest {
        let request =
            UploadRequest::new(self.path(kind)).with_remote_name(self.remote_name(kind));
        match options {
            Some(options) => request.with_options(options),
            None => request,
        }
    }
}

/// Lazily yields [`Asset`]s for an ordered list of names.
#[derive(Debug, Clone)]
pub struct AssetEnumerator<'a, S> {
    layout: &'a AssetLayout,
    names: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> Iterator for AssetEnumerator<'a, S> {
    type Item = Asset;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.get(self.position)?;
        let asset = self.layout.asset(self.position, name.as_ref());
        self.position += 1;
        Some(asset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.names.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<'a, S: AsRef<str>> ExactSizeIterator for AssetEnumerator<'a, S> {}
