use std::{future::Future, time::Duration};

use reqwest::multipart::{Form, Part};
use tracing::{debug, trace};

use crate::{
    constants::{API_KEY_HEADER, SECRET_API_KEY_HEADER},
    PinError, PinRequest,
};

/// The status and body of an HTTP response, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a [`PinRequest`] and hands back whatever the server answered.
///
/// Implementations only fail with [`PinError::Transport`] when no response was received;
/// non-2xx responses are returned as a [`RawResponse`].
pub trait Transport {
    /// Sends the request as `multipart/form-data`.
    fn send(&self, request: PinRequest) -> impl Future<Output = Result<RawResponse, PinError>> + Send;
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, PinError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chakra/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: PinRequest) -> Result<RawResponse, PinError> {
        debug!(
            "POST {} ({} file part(s), {} bytes)",
            request.url,
            request.files.len(),
            request.payload_size()
        );

        // directory parts carry `/` in their filename, which must reach pinata unescaped
        let mut form = Form::new().percent_encode_noop();
        for file in request.files {
            trace!("attaching part '{}' from {}", file.file_name, file.source.display());
            form = form.part("file", Part::bytes(file.bytes).file_name(file.file_name));
        }
        for (name, value) in request.fields {
            form = form.text(name, value);
        }

        let response = self
            .client
            .post(&request.url)
            .header(API_KEY_HEADER, request.api_key)
            .header(SECRET_API_KEY_HEADER, request.api_secret)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!("response HTTP {}: {}", status, body);

        Ok(RawResponse { status, body })
    }
}
