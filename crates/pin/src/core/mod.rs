use std::time::Duration;

use chakra_common::{PinResponse, PinataClient, Transport, UploadRequest};
use chakra_config::Configuration;
use eyre::{eyre, Result};
use tracing::{debug, info, warn};

use crate::PinArgs;

/// The `pin` subcommand. Pins a file or a directory and returns Pinata's response.
pub async fn pin(args: PinArgs, config: &Configuration) -> Result<PinResponse> {
    let config = config.clone().merge(args.pinata.overrides());
    let credentials = config.credentials()?;
    let client = PinataClient::new(credentials, Duration::from_secs(args.pinata.timeout))
        .map_err(|e| eyre!("Failed to create Pinata client: {}", e))?;

    pin_request(&client, &args.request()?, config.gateway_url()).await
}

/// Pins `request` with `client`, logging the resulting CID.
pub async fn pin_request<T: Transport>(
    client: &PinataClient<T>,
    request: &UploadRequest,
    gateway_url: &str,
) -> Result<PinResponse> {
    info!("pinning {} to IPFS", request.target_path.display());
    let response = client.pin(request).await.map_err(|e| {
        eyre!("Failed to pin {}: {}: {}", request.target_path.display(), e.kind(), e)
    })?;

    debug!("response: {}", serde_json::Value::Object(response.as_json().clone()));
    match (response.ipfs_hash(), response.gateway_url(gateway_url)) {
        (Some(cid), Some(url)) => {
            info!("pinned {} at {} ({})", request.target_path.display(), cid, url)
        }
        _ => warn!("pinned {}, but the response carried no IpfsHash", request.target_path.display()),
    }
    if response.is_duplicate() {
        info!("content was already pinned");
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chakra_common::{Credentials, RecordingTransport};
    use tempdir::TempDir;

    #[tokio::test]
    async fn test_pin_request_reports_failures_as_errors() {
        let dir = TempDir::new("pin").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let transport = RecordingTransport::new();
        transport.respond(401, "unauthorized");
        let client =
            PinataClient::with_transport(Credentials::new("k", "s").unwrap(), transport.clone());

        let request = UploadRequest::new(dir.path().join("a.txt"));
        let err = pin_request(&client, &request, "https://ipfs.io/ipfs/").await.unwrap_err();
        assert!(err.to_string().contains("RemoteAPIError"));

        let response = pin_request(&client, &request, "https://ipfs.io/ipfs/").await.unwrap();
        assert_eq!(response.ipfs_hash(), Some("QmRecorded2"));
    }
}
