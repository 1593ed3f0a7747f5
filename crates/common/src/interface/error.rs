use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Errors produced while resolving, uploading or pinning assets.
#[derive(Debug, Error)]
pub enum PinError {
    /// Credentials or other required settings are missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required local file or directory does not exist.
    #[error("asset not found: {}", .path.display())]
    AssetNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The path exists but is the wrong kind of filesystem object.
    #[error("cannot pin {}: {reason}", .path.display())]
    InvalidTarget {
        /// The offending path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// A directory upload was requested for a directory without any files.
    #[error("directory {} contains no files", .path.display())]
    EmptyDirectory {
        /// The directory that was walked
        path: PathBuf,
    },

    /// Reading a local file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file being read
        path: PathBuf,
        /// The underlying io error
        #[source]
        source: std::io::Error,
    },

    /// The pin options could not be attached to the request.
    #[error("invalid pin options: {0}")]
    InvalidOptions(String),

    /// The request never produced an HTTP response (DNS, refused connection, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The pinning service answered with a non-2xx status.
    #[error("pinning service returned HTTP {status}: {body}")]
    RemoteApi {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The pinning service answered 2xx, but the body is not a JSON object.
    #[error("unexpected response (HTTP {status}): {reason}")]
    InvalidResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
        /// Why the body was rejected
        reason: String,
    },
}

/// Coarse classification of a [`PinError`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PinError::Configuration`]
    Configuration,
    /// See [`PinError::AssetNotFound`]
    AssetNotFound,
    /// Invalid targets, empty directories and local read failures
    LocalFile,
    /// See [`PinError::InvalidOptions`]
    InvalidOptions,
    /// See [`PinError::Transport`]
    Transport,
    /// See [`PinError::RemoteApi`]
    RemoteApi,
    /// See [`PinError::InvalidResponse`]
    InvalidResponse,
}

impl PinError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PinError::Configuration(_) => ErrorKind::Configuration,
            PinError::AssetNotFound { .. } => ErrorKind::AssetNotFound,
            PinError::InvalidTarget { .. } |
            PinError::EmptyDirectory { .. } |
            PinError::Io { .. } => ErrorKind::LocalFile,
            PinError::InvalidOptions(_) => ErrorKind::InvalidOptions,
            PinError::Transport(_) => ErrorKind::Transport,
            PinError::RemoteApi { .. } => ErrorKind::RemoteApi,
            PinError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
        }
    }

    /// The HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            PinError::RemoteApi { status, .. } | PinError::InvalidResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Maps an io error on `path` to [`PinError::AssetNotFound`] or [`PinError::Io`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PinError::AssetNotFound { path }
        } else {
            PinError::Io { path, source }
        }
    }
}

impl From<reqwest::Error> for PinError {
    fn from(err: reqwest::Error) -> Self {
        PinError::Transport(err.to_string())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "ConfigurationError"),
            ErrorKind::AssetNotFound => write!(f, "AssetNotFoundError"),
            ErrorKind::LocalFile => write!(f, "LocalFileError"),
            ErrorKind::InvalidOptions => write!(f, "InvalidOptionsError"),
            ErrorKind::Transport => write!(f, "TransportError"),
            ErrorKind::RemoteApi => write!(f, "RemoteAPIError"),
            ErrorKind::InvalidResponse => write!(f, "InvalidResponseError"),
        }
    }
}
