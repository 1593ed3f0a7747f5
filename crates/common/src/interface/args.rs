use clap::Args;
use serde_json::Value;

use crate::{PinError, PinOptions};

/// Command line flags shared by every subcommand that pins something.
#[derive(Debug, Clone, Default, Args)]
#[clap(next_help_heading = "PIN OPTIONS")]
pub struct PinOptionArgs {
    /// Raw pin options as a JSON object with `pinataMetadata` and/or `pinataOptions` keys.
    /// The other flags are applied on top of it.
    #[clap(long, value_name = "JSON", value_parser = parse_json)]
    pub pin_options: Option<Value>,

    /// The CID version Pinata should use for the pinned content.
    #[clap(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub cid_version: Option<u8>,

    /// Attach a `KEY=VALUE` pair to the pin's metadata. May be repeated.
    #[clap(long = "key-value", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub key_values: Vec<(String, String)>,
}

impl PinOptionArgs {
    /// Builds the [`PinOptions`] described by the flags.
    pub fn to_pin_options(&self) -> Result<PinOptions, PinError> {
        let mut options = match &self.pin_options {
            Some(value) => PinOptions::from_value(value.clone())?,
            None => PinOptions::default(),
        };
        if let Some(version) = self.cid_version {
            options = options.with_cid_version(version);
        }
        for (key, value) in &self.key_values {
            options = options.with_key_value(key.clone(), value.clone());
        }
        Ok(options)
    }
}

/// Parses a JSON document.
pub fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
}

/// Parses `KEY=VALUE`, splitting on the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("collection=chakras"), Ok(("collection".into(), "chakras".into())));
        assert_eq!(parse_key_value("note=a=b"), Ok(("note".into(), "a=b".into())));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_flags_become_pin_options() {
        let args = PinOptionArgs {
            pin_options: None,
            cid_version: Some(1),
            key_values: vec![("collection".to_string(), "chakras".to_string())],
        };
        let options = args.to_pin_options().unwrap();

        assert_eq!(options.pinata_options.unwrap()["cidVersion"], 1);
        assert_eq!(options.pinata_metadata.unwrap()["keyvalues"]["collection"], "chakras");
        assert!(PinOptionArgs::default().to_pin_options().unwrap().is_empty());
    }

    #[test]
    fn test_flags_override_raw_options() {
        let args = PinOptionArgs {
            pin_options: Some(
                parse_json(
                    r#"{"pinataOptions":{"cidVersion":0,"wrapWithDirectory":true},"extra":1}"#,
                )
                .unwrap(),
            ),
            cid_version: Some(1),
            key_values: vec![],
        };
        let options = args.to_pin_options().unwrap();

        let pin_options = options.pinata_options.unwrap();
        assert_eq!(pin_options["cidVersion"], 1);
        assert_eq!(pin_options["wrapWithDirectory"], true);
        assert_eq!(options.pinata_metadata, None);
    }

    #[test]
    fn test_raw_options_must_hold_objects() {
        let args = PinOptionArgs {
            pin_options: Some(parse_json(r#"{"pinataMetadata":"red"}"#).unwrap()),
            ..Default::default()
        };
        assert_eq!(args.to_pin_options().unwrap_err().kind(), crate::ErrorKind::InvalidOptions);
        assert!(parse_json("{not json").is_err());
    }
}
