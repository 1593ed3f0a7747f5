use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::PinError;

/// The form field carrying [`PinOptions::pinata_metadata`].
pub const PINATA_METADATA_FIELD: &str = "pinataMetadata";
/// The form field carrying [`PinOptions::pinata_options`].
pub const PINATA_OPTIONS_FIELD: &str = "pinataOptions";

/// Optional settings attached to a pin.
///
/// Both fields are opaque JSON objects forwarded to Pinata as-is. Only their shape (an
/// object) is checked locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinOptions {
    /// Metadata attached to the pin, e.g. `{"name": "...", "keyvalues": {...}}`.
    #[serde(rename = "pinataMetadata", default, skip_serializing_if = "Option::is_none")]
    pub pinata_metadata: Option<Map<String, Value>>,
    /// Pin behaviour, e.g. `{"cidVersion": 1, "wrapWithDirectory": false}`.
    #[serde(rename = "pinataOptions", default, skip_serializing_if = "Option::is_none")]
    pub pinata_options: Option<Map<String, Value>>,
}

impl PinOptions {
    /// Builds options from a loosely typed JSON value.
    ///
    /// `value` must be an object. The recognised keys must hold objects; any other key is
    /// ignored with a warning.
    pub fn from_value(value: Value) -> Result<Self, PinError> {
        let Value::Object(map) = value else {
            return Err(PinError::InvalidOptions(format!("expected a JSON object, got {}", value)));
        };

        let mut options = Self::default();
        for (key, value) in map {
            match key.as_str() {
                PINATA_METADATA_FIELD => options.pinata_metadata = Some(expect_object(&key, value)?),
                PINATA_OPTIONS_FIELD => options.pinata_options = Some(expect_object(&key, value)?),
                _ => warn!("ignoring unknown pin option '{}'", key),
            }
        }

        Ok(options)
    }

    /// Sets `pinataMetadata.name`.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata_mut().insert("name".to_string(), Value::String(name.into()));
        self
    }

    /// Adds an entry to `pinataMetadata.keyvalues`.
    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let keyvalues = self
            .metadata_mut()
            .entry("keyvalues")
            .or_insert_with(|| Value::Object(Map::new()));
        if !keyvalues.is_object() {
            *keyvalues = Value::Object(Map::new());
        }
        if let Value::Object(keyvalues) = keyvalues {
            keyvalues.insert(key.into(), value.into());
        }
        self
    }

    /// Sets `pinataOptions.cidVersion`.
    pub fn with_cid_version(mut self, version: u8) -> Self {
        self.options_mut().insert("cidVersion".to_string(), Value::from(version));
        self
    }

    /// Sets `pinataOptions.wrapWithDirectory`.
    pub fn with_wrap_with_directory(mut self, wrap: bool) -> Self {
        self.options_mut().insert("wrapWithDirectory".to_string(), Value::Bool(wrap));
        self
    }

    /// Whether neither field is set.
    pub fn is_empty(&self) -> bool {
        self.pinata_metadata.is_none() && self.pinata_options.is_none()
    }

    /// Serializes the set fields into `(name, json)` form fields, metadata first.
    pub fn form_fields(&self) -> Result<Vec<(String, String)>, PinError> {
        let mut fields = Vec::new();
        if let Some(metadata) = &self.pinata_metadata {
            fields.push((PINATA_METADATA_FIELD.to_string(), serialize(metadata)?));
        }
        if let Some(options) = &self.pinata_options {
            fields.push((PINATA_OPTIONS_FIELD.to_string(), serialize(options)?));
        }
        Ok(fields)
    }

    fn metadata_mut(&mut self) -> &mut Map<String, Value> {
        self.pinata_metadata.get_or_insert_with(Map::new)
    }

    fn options_mut(&mut self) -> &mut Map<String, Value> {
        self.pinata_options.get_or_insert_with(Map::new)
    }
}

fn expect_object(key: &str, value: Value) -> Result<Map<String, Value>, PinError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(PinError::InvalidOptions(format!("'{}' must be a JSON object, got {}", key, other))),
    }
}

fn serialize(map: &Map<String, Value>) -> Result<String, PinError> {
    serde_json::to_string(map).map_err(|e| PinError::InvalidOptions(e.to_string()))
}
