//! Payload builder tests

use std::fs;

use sncicd_batch_install::app::inputs::Inputs;
use sncicd_batch_install::errors::{ConfigErrorKind, InstallError};
use sncicd_batch_install::manifest::payload::PayloadBuilder;
use sncicd_batch_install::models::batch::PackageType;

const MANIFEST: &str = r#"{
    "name": "123",
    "packages": [
        {
            "id": "1",
            "type": "application",
            "load_demo_data": false,
            "requested_version": "2",
            "requested_customization_version": "3",
            "notes": "test"
        }
    ]
}"#;

#[tokio::test]
async fn test_file_source_reads_default_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("now_batch_manifest.json"), MANIFEST).unwrap();
    let inputs = Inputs::default();

    let payload = PayloadBuilder::new(Some(dir.path()), &inputs)
        .build("file")
        .await
        .unwrap();

    assert_eq!(payload.name, "123");
    assert_eq!(payload.packages[0].package_type, PackageType::Application);
    assert_eq!(payload.packages[0].requested_version, Some(serde_json::json!("2")));
    assert_eq!(payload.packages[0].load_demo_data, Some(false));
}

#[tokio::test]
async fn test_file_source_honours_filename_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("custom.json"), MANIFEST).unwrap();
    let inputs = Inputs::from_pairs([("filename", "custom.json")]);

    let payload = PayloadBuilder::new(Some(dir.path()), &inputs)
        .build("file")
        .await
        .unwrap();

    assert_eq!(payload.packages.len(), 1);
}

#[tokio::test]
async fn test_file_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = Inputs::default();

    let err = PayloadBuilder::new(Some(dir.path()), &inputs)
        .build("file")
        .await
        .unwrap_err();

    assert!(matches!(err, InstallError::Config(ConfigErrorKind::MissingPayload)));
}

#[tokio::test]
async fn test_file_source_corrupted_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("now_batch_manifest.json"), "{\"name\": 1}").unwrap();
    let inputs = Inputs::default();

    let err = PayloadBuilder::new(Some(dir.path()), &inputs)
        .build("file")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Payload is empty, corrupted or not set");
}

#[tokio::test]
async fn test_file_source_requires_workspace() {
    let inputs = Inputs::default();
    let err = PayloadBuilder::new(None, &inputs).build("file").await.unwrap_err();
    assert_eq!(err.to_string(), "GITHUB_WORKSPACE env not found");
}

#[tokio::test]
async fn test_workflow_source_keeps_numeric_versions() {
    let manifest = r#"{
        "name": "numeric",
        "packages": [{"id": "1", "type": "application", "requested_version": 2, "scope": "x_acme"}]
    }"#;
    let inputs = Inputs::from_pairs([("manifest", manifest)]);

    let payload = PayloadBuilder::new(None, &inputs).build("workflow").await.unwrap();

    assert_eq!(payload.packages[0].requested_version, Some(serde_json::json!(2)));
    assert_eq!(payload.packages[0].extra["scope"], "x_acme");
}

#[tokio::test]
async fn test_workflow_source_parses_inline_manifest() {
    let inputs = Inputs::from_pairs([("manifest", MANIFEST)]);

    let payload = PayloadBuilder::new(None, &inputs).build("workflow").await.unwrap();

    assert_eq!(payload.name, "123");
}

#[tokio::test]
async fn test_unsupported_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("now_batch_manifest.json"), MANIFEST).unwrap();
    let inputs = Inputs::from_pairs([("manifest", MANIFEST)]);

    let err = PayloadBuilder::new(Some(dir.path()), &inputs)
        .build("undefined")
        .await
        .unwrap_err();

    assert!(matches!(err, InstallError::Config(ConfigErrorKind::WrongSource)));
}
