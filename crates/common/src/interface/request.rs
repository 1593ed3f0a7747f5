use std::path::{Path, PathBuf};

use crate::{Credentials, PinOptions};

/// A request to pin something on the local filesystem.
///
/// Whether a single file or a whole directory is uploaded is decided by what `target_path`
/// points at when the request is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// The local file or directory to pin
    pub target_path: PathBuf,
    /// The filename given to a single-file upload. Ignored for directories.
    pub remote_name: String,
    /// Optional pin metadata and options
    pub options: Option<PinOptions>,
}

impl UploadRequest {
    /// Creates a new request. The remote name defaults to the target's file name.
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        let target_path = target_path.into();
        let remote_name = target_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());

        Self { target_path, remote_name, options: None }
    }

    /// Overrides the remote filename.
    pub fn with_remote_name(mut self, remote_name: impl Into<String>) -> Self {
        self.remote_name = remote_name.into();
        self
    }

    /// Attaches pin options.
    pub fn with_options(mut self, options: PinOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A single `file` part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// The filename announced for the part
    pub file_name: String,
    /// The source file on disk
    pub source: PathBuf,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Reads `source` fully into a new part named `file_name`.
    pub fn read(source: &Path, file_name: impl Into<String>) -> Result<Self, crate::PinError> {
        let bytes = std::fs::read(source).map_err(|e| crate::PinError::from_io(source, e))?;
        Ok(Self { file_name: file_name.into(), source: source.to_path_buf(), bytes })
    }
}

/// A fully built `pinFileToIPFS` request, ready to be handed to a
/// [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRequest {
    /// Endpoint to POST to
    pub url: String,
    /// Value of the `pinata_api_key` header
    pub api_key: String,
    /// Value of the `pinata_secret_api_key` header
    pub api_secret: String,
    /// `file` parts, in the order they are sent
    pub files: Vec<FilePart>,
    /// Text fields sent after the files
    pub fields: Vec<(String, String)>,
}

impl PinRequest {
    /// Creates an empty request to `url` authenticated with `credentials`.
    pub fn new(url: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            url: url.into(),
            api_key: credentials.api_key().to_string(),
            api_secret: credentials.api_secret().to_string(),
            files: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// The filenames of all parts, in order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|part| part.file_name.as_str()).collect()
    }

    /// Looks up a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    /// Total size of all file parts in bytes.
    pub fn payload_size(&self) -> usize {
        self.files.iter().map(|part| part.bytes.len()).sum()
    }
}
