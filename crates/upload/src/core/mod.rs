use std::{path::Path, time::Duration};

use chakra_common::{AssetKind, AssetLayout, PinOptions, PinataClient, Transport};
use chakra_config::Configuration;
use eyre::{eyre, Result};
use tracing::{debug, error, info};

use crate::{AssetOutcome, UploadArgs, UploadReport};

/// The `upload` subcommand. Pins the image and metadata of every named asset, one file at a
/// time, and reports what happened to each file.
///
/// Only configuration problems are returned as errors. Failed pins are recorded in the
/// [`UploadReport`] and never stop the run.
pub async fn upload(args: UploadArgs, config: &Configuration) -> Result<UploadReport> {
    let config = config.clone().merge(args.pinata.overrides());
    let credentials = config.credentials()?;
    let client = PinataClient::new(credentials, Duration::from_secs(args.pinata.timeout))
        .map_err(|e| eyre!("Failed to create Pinata client: {}", e))?;

    let layout = args.layout();
    info!(
        "pinning {} assets from {} and {}",
        args.names.len(),
        layout.image_dir.display(),
        layout.metadata_dir.display()
    );

    let options = args.options.to_pin_options()?;
    let report = pin_assets(&client, &layout, &args.names, &options).await;
    info!("{}", report.summary());

    if let Some(out) = &args.out {
        save_manifest(&report, out, config.gateway_url())?;
    }

    Ok(report)
}

/// Writes the manifest of `report` to `out`.
///
/// The pins have already happened by the time the manifest is written, so a failed write
/// carries the outcome summary in its error.
pub fn save_manifest(report: &UploadReport, out: &Path, gateway_url: &str) -> Result<()> {
    report.write_manifest(out, gateway_url).map_err(|e| {
        let outcomes =
            if report.is_success() { report.summary() } else { report.failure_summary() };
        eyre!("Failed to write manifest to {}: {}\n{}", out.display(), e, outcomes)
    })?;
    info!("wrote manifest to {}", out.display());
    Ok(())
}

/// Pins the image, then the metadata, of each asset in `names`, sequentially.
///
/// Each pin carries `options` plus `pinataMetadata.name` set to the local filename. A missing
/// file is recorded as a failure for that file only; the other file of the pair is still
/// attempted.
pub async fn pin_assets<T: Transport, S: AsRef<str>>(
    client: &PinataClient<T>,
    layout: &AssetLayout,
    names: &[S],
    options: &PinOptions,
) -> UploadReport {
    let mut report = UploadReport::default();

    for asset in layout.assets(names) {
        info!("processing {} (#{})", asset.name, asset.index);

        for kind in [AssetKind::Image, AssetKind::Metadata] {
            let file_options = options.clone().with_name(layout.file_name(&asset.name, kind));
            let request = asset.upload_request(kind, Some(file_options));

            let result = client
                .pin_file(&request.target_path, &request.remote_name, request.options.as_ref())
                .await;

            let outcome = AssetOutcome {
                asset: asset.name.clone(),
                index: asset.index,
                kind,
                path: request.target_path,
                remote_name: request.remote_name,
                result,
            };
            match &outcome.result {
                Ok(response) => {
                    info!("{}", outcome);
                    debug!("response: {}", serde_json::Value::Object(response.as_json().clone()));
                }
                Err(_) => error!("{}", outcome),
            }

            report.push(outcome);
        }
    }

    report
}
