use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

use chakra_common::{AssetKind, PinError, PinResponse};
use chrono::{DateTime, Utc};
use eyre::Result;
use serde::Serialize;

/// The outcome of pinning one file of one asset.
#[derive(Debug)]
pub struct AssetOutcome {
    /// The asset name, e.g. `red`
    pub asset: String,
    /// The asset's position in the name list
    pub index: usize,
    /// Which file of the pair
    pub kind: AssetKind,
    /// The local file
    pub path: PathBuf,
    /// The filename it was pinned under
    pub remote_name: String,
    /// The parsed response, or why there is none
    pub result: Result<PinResponse, PinError>,
}

impl AssetOutcome {
    /// Whether the file was pinned.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl Display for AssetOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(response) => write!(
                f,
                "{} {} ({}) pinned as {} -> {}",
                self.asset,
                self.kind,
                self.path.display(),
                self.remote_name,
                response.ipfs_hash().unwrap_or("<no IpfsHash>")
            ),
            Err(err) => write!(
                f,
                "{} {} ({}): {}: {}",
                self.asset,
                self.kind,
                self.path.display(),
                err.kind(),
                err
            ),
        }
    }
}

/// Every outcome of an `upload` run, in the order the files were processed.
#[derive(Debug, Default)]
pub struct UploadReport {
    /// One entry per file
    pub outcomes: Vec<AssetOutcome>,
}

impl UploadReport {
    /// Records an outcome.
    pub fn push(&mut self, outcome: AssetOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes that pinned successfully.
    pub fn successes(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    /// Outcomes that failed, for any reason.
    pub fn failures(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    /// Whether every file was pinned.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// A one line summary, e.g. `13 of 14 files pinned, 1 failed`.
    pub fn summary(&self) -> String {
        let failed = self.failures().count();
        format!(
            "{} of {} files pinned, {} failed",
            self.outcomes.len() - failed,
            self.outcomes.len(),
            failed
        )
    }

    /// A multi-line description of every failure, suitable for stderr.
    pub fn failure_summary(&self) -> String {
        let mut summary = format!("{}:\n", self.summary());
        for failure in self.failures() {
            summary.push_str(&format!("  - {}\n", failure));
        }
        summary
    }

    /// Builds the manifest written by `--out`.
    pub fn manifest(&self, gateway_url: &str) -> Manifest {
        Manifest {
            generated_at: Utc::now(),
            gateway_url: gateway_url.to_string(),
            entries: self
                .outcomes
                .iter()
                .map(|outcome| {
                    let response = outcome.result.as_ref().ok();
                    ManifestEntry {
                        name: outcome.asset.clone(),
                        index: outcome.index,
                        kind: outcome.kind,
                        path: outcome.path.clone(),
                        remote_name: outcome.remote_name.clone(),
                        ipfs_hash: response.and_then(|r| r.ipfs_hash()).map(String::from),
                        gateway_url: response.and_then(|r| r.gateway_url(gateway_url)),
                        pinned_at: response.and_then(|r| r.timestamp()).map(String::from),
                        error: outcome.result.as_ref().err().map(|e| format!("{}: {}", e.kind(), e)),
                    }
                })
                .collect(),
        }
    }

    /// Writes the manifest to `path` as pretty-printed JSON.
    pub fn write_manifest(&self, path: &Path, gateway_url: &str) -> Result<()> {
        let manifest = serde_json::to_string_pretty(&self.manifest(gateway_url))?;
        std::fs::write(path, manifest)?;
        Ok(())
    }
}

/// The JSON document written by `chakra upload --out`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// When the manifest was written
    pub generated_at: DateTime<Utc>,
    /// The gateway the links point at
    pub gateway_url: String,
    /// One entry per file, in processing order
    pub entries: Vec<ManifestEntry>,
}

/// A single file in a [`Manifest`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// The asset name
    pub name: String,
    /// The asset's position in the name list
    pub index: usize,
    /// `image` or `metadata`
    pub kind: AssetKind,
    /// The local file
    pub path: PathBuf,
    /// The filename it was pinned under
    pub remote_name: String,
    /// The CID, if pinned
    pub ipfs_hash: Option<String>,
    /// A gateway link to the CID, if pinned
    pub gateway_url: Option<String>,
    /// Pinata's timestamp, if pinned
    pub pinned_at: Option<String>,
    /// The failure, if any
    pub error: Option<String>,
}
