use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::PinError;

/// A regular file found below a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Path relative to the walked directory
    pub relative: PathBuf,
}

impl DiscoveredFile {
    /// The relative path with `/` separators, prefixed with `root_name`, e.g. `assets/sub/b.txt`.
    pub fn upload_name(&self, root_name: &str) -> String {
        let relative = self
            .relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", root_name, relative)
    }
}

/// Recursively collects every regular file below `root`.
///
/// Files are returned sorted by their relative path, compared component by component, so the
/// result does not depend on the order the filesystem lists entries in. Directory symlinks are
/// never descended into. A symlink that resolves to a regular file is included, anything else
/// behind a symlink is skipped.
pub fn discover_files(root: &Path) -> Result<Vec<DiscoveredFile>, PinError> {
    let root = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir().map_err(|e| PinError::from_io(root, e))?.join(root)
    };
    if !root.is_dir() {
        if !root.exists() {
            return Err(PinError::AssetNotFound { path: root });
        }
        return Err(PinError::InvalidTarget { path: root, reason: "not a directory".to_string() });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            match e.into_io_error() {
                Some(source) => PinError::from_io(path, source),
                None => PinError::InvalidTarget { path, reason: "filesystem loop".to_string() },
            }
        })?;

        let file_type = entry.file_type();
        let include = if file_type.is_file() {
            true
        } else if file_type.is_symlink() {
            let resolves_to_file =
                std::fs::metadata(entry.path()).map(|meta| meta.is_file()).unwrap_or(false);
            if !resolves_to_file {
                debug!("skipping symlink {}", entry.path().display());
            }
            resolves_to_file
        } else {
            false
        };

        if include {
            let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path()).to_path_buf();
            trace!("discovered {}", relative.display());
            files.push(DiscoveredFile { path: entry.path().to_path_buf(), relative });
        }
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));

    Ok(files)
}
