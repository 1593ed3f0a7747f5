use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::PinError;

/// The parsed body of a successful pin.
///
/// Pinata answers with `{"IpfsHash": ..., "PinSize": ..., "Timestamp": ...}`. The body is
/// kept as-is; the accessors only read the well known keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinResponse(Map<String, Value>);

impl PinResponse {
    /// Parses a 2xx response body.
    pub fn parse(status: u16, body: &str) -> Result<Self, PinError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(PinError::InvalidResponse {
                status,
                body: body.to_string(),
                reason: format!("expected a JSON object, got {}", other),
            }),
            Err(e) => Err(PinError::InvalidResponse {
                status,
                body: body.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// The CID of the pinned content.
    pub fn ipfs_hash(&self) -> Option<&str> {
        self.0.get("IpfsHash").and_then(Value::as_str)
    }

    /// Size of the pinned content in bytes.
    pub fn pin_size(&self) -> Option<u64> {
        self.0.get("PinSize").and_then(Value::as_u64)
    }

    /// When the content was pinned.
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("Timestamp").and_then(Value::as_str)
    }

    /// Whether Pinata reported the content as already pinned.
    pub fn is_duplicate(&self) -> bool {
        self.0.get("isDuplicate").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Builds a gateway URL for the pinned CID, e.g. `https://gateway.pinata.cloud/ipfs/<cid>`.
    pub fn gateway_url(&self, base_gateway_url: &str) -> Option<String> {
        self.ipfs_hash().map(|cid| format!("{}/{}", base_gateway_url.trim_end_matches('/'), cid))
    }

    /// The raw JSON object.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the response, returning the raw JSON value.
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}
