use std::path::Path;

use chakra_common::{
    AssetKind, AssetLayout, Credentials, ErrorKind, PinOptions, PinataClient, RecordingTransport,
    CHAKRAS,
};
use chakra_upload::{pin_assets, save_manifest};
use tempdir::TempDir;

fn write(path: &Path, contents: &[u8]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn client(transport: &RecordingTransport) -> PinataClient<RecordingTransport> {
    PinataClient::with_transport(Credentials::new("key", "secret").unwrap(), transport.clone())
}

#[tokio::test]
async fn test_missing_metadata_is_reported_and_the_run_continues() {
    chakra_tracing::init_test_tracing();

    let dir = TempDir::new("upload").unwrap();
    let layout = AssetLayout::rooted_at(dir.path());
    write(&layout.image_dir.join("chakra-red.png"), b"red image");
    write(&layout.metadata_dir.join("chakra-red.json"), br#"{"name":"red"}"#);
    write(&layout.image_dir.join("chakra-orange.png"), b"orange image");

    let transport = RecordingTransport::new();
    let report =
        pin_assets(&client(&transport), &layout, &["red", "orange"], &PinOptions::default()).await;

    assert_eq!(transport.request_count(), 3);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.successes().count(), 3);

    let failures = report.failures().collect::<Vec<_>>();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].asset, "orange");
    assert_eq!(failures[0].kind, AssetKind::Metadata);
    assert_eq!(failures[0].result.as_ref().unwrap_err().kind(), ErrorKind::AssetNotFound);
    assert!(!report.is_success());

    let names = transport
        .requests()
        .iter()
        .flat_map(|request| request.file_names().into_iter().map(String::from).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["0.png", "0.json", "1.png"]);
}

#[tokio::test]
async fn test_remote_failures_do_not_abort_remaining_assets() {
    let dir = TempDir::new("upload").unwrap();
    let layout = AssetLayout::rooted_at(dir.path());
    for name in CHAKRAS {
        write(&layout.image_dir.join(layout.file_name(name, AssetKind::Image)), name.as_bytes());
        write(&layout.metadata_dir.join(layout.file_name(name, AssetKind::Metadata)), b"{}");
    }

    let transport = RecordingTransport::new();
    transport.respond(403, r#"{"error":"forbidden"}"#).fail("connection reset");

    let report = pin_assets(&client(&transport), &layout, &CHAKRAS, &PinOptions::default()).await;

    assert_eq!(transport.request_count(), CHAKRAS.len() * 2);
    let failures = report.failures().collect::<Vec<_>>();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].result.as_ref().unwrap_err().status(), Some(403));
    assert_eq!(failures[1].result.as_ref().unwrap_err().kind(), ErrorKind::Transport);
    assert_eq!(report.summary(), "12 of 14 files pinned, 2 failed");
}

#[tokio::test]
async fn test_each_pin_is_named_after_its_local_file() {
    let dir = TempDir::new("upload").unwrap();
    let layout = AssetLayout::rooted_at(dir.path());
    write(&layout.image_dir.join("chakra-violet.png"), b"violet");
    write(&layout.metadata_dir.join("chakra-violet.json"), b"{}");

    let transport = RecordingTransport::new();
    let options = PinOptions::default().with_cid_version(1);
    pin_assets(&client(&transport), &layout, &["violet"], &options).await;

    let requests = transport.requests();
    assert_eq!(requests[0].field("pinataMetadata"), Some(r#"{"name":"chakra-violet.png"}"#));
    assert_eq!(requests[1].field("pinataMetadata"), Some(r#"{"name":"chakra-violet.json"}"#));
    assert!(requests.iter().all(|request| request.field("pinataOptions") == Some(r#"{"cidVersion":1}"#)));
}

#[tokio::test]
async fn test_manifest_write_failure_keeps_the_outcomes() {
    let dir = TempDir::new("upload").unwrap();
    let layout = AssetLayout::rooted_at(dir.path());
    write(&layout.image_dir.join("chakra-orange.png"), b"orange image");

    let transport = RecordingTransport::new();
    let report =
        pin_assets(&client(&transport), &layout, &["orange"], &PinOptions::default()).await;

    // the target is a directory, so the write fails
    let err = save_manifest(&report, dir.path(), "https://ipfs.io/ipfs/").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Failed to write manifest"));
    assert!(message.contains("1 of 2 files pinned, 1 failed"));
    assert!(message.contains("orange metadata"));
    assert!(message.contains("AssetNotFoundError"));

    let out = dir.path().join("manifest.json");
    save_manifest(&report, &out, "https://ipfs.io/ipfs/").unwrap();
    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(manifest["entries"].as_array().unwrap().len(), 2);
}
