use std::{path::Path, time::Duration};

use tracing::{debug, info};

use crate::{
    constants::PIN_FILE_TO_IPFS_URL, discover_files, Credentials, FilePart, HttpTransport,
    PinError, PinOptions, PinRequest, PinResponse, Transport, UploadRequest,
};

/// Client for Pinata's `pinFileToIPFS` endpoint.
///
/// Every call performs at most one HTTP request and is never retried.
#[derive(Debug, Clone)]
pub struct PinataClient<T = HttpTransport> {
    credentials: Credentials,
    transport: T,
    url: String,
}

impl PinataClient<HttpTransport> {
    /// Creates a client that talks to Pinata over HTTP.
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, PinError> {
        Ok(Self::with_transport(credentials, HttpTransport::new(timeout)?))
    }
}

impl<T: Transport> PinataClient<T> {
    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self { credentials, transport, url: PIN_FILE_TO_IPFS_URL.to_string() }
    }

    /// Pins whatever `request.target_path` points at: a directory is uploaded with
    /// [`Self::pin_directory`], anything else with [`Self::pin_file`].
    pub async fn pin(&self, request: &UploadRequest) -> Result<PinResponse, PinError> {
        if request.target_path.is_dir() {
            self.pin_directory(&request.target_path, request.options.as_ref()).await
        } else {
            self.pin_file(&request.target_path, &request.remote_name, request.options.as_ref())
                .await
        }
    }

    /// Pins a single file under the filename `remote_name`.
    ///
    /// The file is checked and read before anything is sent, so a missing file never results
    /// in a network request.
    pub async fn pin_file(
        &self,
        path: &Path,
        remote_name: &str,
        options: Option<&PinOptions>,
    ) -> Result<PinResponse, PinError> {
        let metadata = std::fs::metadata(path).map_err(|e| PinError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(PinError::InvalidTarget {
                path: path.to_path_buf(),
                reason: "not a regular file".to_string(),
            });
        }

        let mut request = self.request(options)?;
        request.files.push(FilePart::read(path, remote_name)?);

        debug!("pinning {} as '{}'", path.display(), remote_name);
        self.execute(request).await
    }

    /// Pins every file below `path` as one unit, in a single request with one `file` part per
    /// file.
    ///
    /// Parts are named `<directory name>/<relative path>` and ordered as returned by
    /// [`discover_files`].
    pub async fn pin_directory(
        &self,
        path: &Path,
        options: Option<&PinOptions>,
    ) -> Result<PinResponse, PinError> {
        let files = discover_files(path)?;
        if files.is_empty() {
            return Err(PinError::EmptyDirectory { path: path.to_path_buf() });
        }

        let root_name = directory_name(path);
        let mut request = self.request(options)?;
        for file in &files {
            request.files.push(FilePart::read(&file.path, file.upload_name(&root_name))?);
        }

        info!("pinning {} files from {} as '{}'", files.len(), path.display(), root_name);
        self.execute(request).await
    }

    fn request(&self, options: Option<&PinOptions>) -> Result<PinRequest, PinError> {
        let mut request = PinRequest::new(&self.url, &self.credentials);
        if let Some(options) = options {
            request.fields = options.form_fields()?;
        }
        Ok(request)
    }

    async fn execute(&self, request: PinRequest) -> Result<PinResponse, PinError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(PinError::RemoteApi { status: response.status, body: response.body });
        }

        PinResponse::parse(response.status, &response.body)
    }
}

/// The last component of `path`, used as the top-level folder of a directory pin.
fn directory_name(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
    };

    absolute
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .last()
        .unwrap_or_else(|| "files".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, RecordingTransport};
    use serde_json::json;
    use tempdir::TempDir;

    fn client(transport: &RecordingTransport) -> PinataClient<RecordingTransport> {
        PinataClient::with_transport(Credentials::new("key", "secret").unwrap(), transport.clone())
    }

    #[tokio::test]
    async fn test_pin_file_returns_parsed_body() {
        let dir = TempDir::new("pin").unwrap();
        let path = dir.path().join("chakra-red.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"IpfsHash":"Qm123","Timestamp":"2024-01-01T00:00:00Z"}"#);

        let response = client(&transport).pin_file(&path, "0.png", None).await.unwrap();
        assert_eq!(
            response.into_json(),
            json!({ "IpfsHash": "Qm123", "Timestamp": "2024-01-01T00:00:00Z" })
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, PIN_FILE_TO_IPFS_URL);
        assert_eq!(requests[0].api_key, "key");
        assert_eq!(requests[0].api_secret, "secret");
        assert_eq!(requests[0].file_names(), vec!["0.png"]);
        assert_eq!(requests[0].files[0].bytes, b"\x89PNG");
        assert!(requests[0].fields.is_empty());
    }

    #[tokio::test]
    async fn test_pin_file_missing_path_sends_nothing() {
        let dir = TempDir::new("pin").unwrap();
        let transport = RecordingTransport::new();

        let err = client(&transport)
            .pin_file(&dir.path().join("missing.png"), "0.png", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AssetNotFound);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_pin_file_remote_error_keeps_status_and_body() {
        let dir = TempDir::new("pin").unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, b"{}").unwrap();

        let transport = RecordingTransport::new();
        transport.respond(403, r#"{"error":"Invalid API key"}"#);

        let err = client(&transport).pin_file(&path, "0.json", None).await.unwrap_err();
        match err {
            PinError::RemoteApi { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, r#"{"error":"Invalid API key"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pin_file_transport_failure() {
        let dir = TempDir::new("pin").unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, b"{}").unwrap();

        let transport = RecordingTransport::new();
        transport.fail("connection refused");

        let err = client(&transport).pin_file(&path, "0.json", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_pin_file_attaches_options_as_fields() {
        let dir = TempDir::new("pin").unwrap();
        let path = dir.path().join("a.json");
        std::fs::write(&path, b"{}").unwrap();

        let transport = RecordingTransport::new();
        let options = PinOptions::default().with_name("chakra-red.json").with_cid_version(1);
        client(&transport).pin_file(&path, "0.json", Some(&options)).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.field("pinataMetadata"), Some(r#"{"name":"chakra-red.json"}"#));
        assert_eq!(request.field("pinataOptions"), Some(r#"{"cidVersion":1}"#));
    }

    #[tokio::test]
    async fn test_pin_directory_sends_one_request_with_all_files() {
        let dir = TempDir::new("pin").unwrap();
        let root = dir.path().join("assets");
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("sub/b.txt"), b"b").unwrap();
        std::fs::write(root.join("a.txt"), b"a").unwrap();

        let transport = RecordingTransport::new();
        transport.respond(200, r#"{"IpfsHash":"QmDir"}"#);

        let response = client(&transport).pin_directory(&root, None).await.unwrap();
        assert_eq!(response.ipfs_hash(), Some("QmDir"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].file_names(), vec!["assets/a.txt", "assets/sub/b.txt"]);
        assert_eq!(requests[0].files[1].bytes, b"b");
    }

    #[tokio::test]
    async fn test_pin_directory_rejects_empty_directory() {
        let dir = TempDir::new("pin").unwrap();
        let transport = RecordingTransport::new();

        let err = client(&transport).pin_directory(dir.path(), None).await.unwrap_err();
        assert!(matches!(err, PinError::EmptyDirectory { .. }));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_pin_dispatches_on_target_kind() {
        let dir = TempDir::new("pin").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let transport = RecordingTransport::new();
        let client = client(&transport);

        let file = UploadRequest::new(dir.path().join("a.txt")).with_remote_name("renamed.txt");
        client.pin(&file).await.unwrap();
        client.pin(&UploadRequest::new(dir.path())).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].file_names(), vec!["renamed.txt"]);
        assert_eq!(requests[1].file_names().len(), 1);
        assert!(requests[1].file_names()[0].ends_with("/a.txt"));
    }

    #[test]
    fn test_directory_name_ignores_trailing_dots() {
        assert_eq!(directory_name(Path::new("/tmp/assets/.")), "assets");
        assert_eq!(directory_name(Path::new("/tmp/assets/")), "assets");
    }
}
