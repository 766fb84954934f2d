//! End-to-end install runs

use std::fs;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sncicd_batch_install::app::inputs::Inputs;
use sncicd_batch_install::app::options::InstallOptions;
use sncicd_batch_install::app::run::{install_batch, run};
use sncicd_batch_install::errors::{ConfigErrorKind, InstallError};
use sncicd_batch_install::http::client::HttpClient;

use crate::common::{sample_payload, snapshot, MockApi, RecordingReporter, SleepLog};

fn options(pairs: &[(&str, &str)]) -> InstallOptions {
    let mut all = vec![("username", "admin"), ("password", "secret")];
    all.extend_from_slice(pairs);
    InstallOptions::from_inputs(&Inputs::from_pairs(all)).unwrap()
}

#[tokio::test]
async fn test_wrong_source_fails_before_url_check() {
    let inputs = Inputs::default();
    let opts = options(&[("source", "git")]);

    let err = run(&opts, &inputs, &RecordingReporter::default()).await.unwrap_err();

    assert!(matches!(err, InstallError::Config(ConfigErrorKind::WrongSource)));
}

#[tokio::test]
async fn test_missing_instance() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("now_batch_manifest.json"),
        serde_json::to_string(&sample_payload()).unwrap(),
    )
    .unwrap();
    let workspace = dir.path().to_string_lossy().to_string();
    let opts = options(&[("source", "file"), ("workspace", workspace.as_str())]);

    let err = run(&opts, &Inputs::default(), &RecordingReporter::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "nowInstallInstance is not set");
}

#[tokio::test]
async fn test_install_batch_submits_then_polls() {
    let mut api = MockApi::with_progress(vec![snapshot(json!({
        "status": "2",
        "status_label": "Successful",
        "status_message": "Done",
        "status_detail": "All packages installed",
        "percent_complete": 100
    }))]);
    api.submitted = Some(snapshot(json!({
        "status": "0",
        "status_label": "Pending",
        "links": {
            "progress": {"id": "p", "url": "https://x/progress"},
            "rollback": {"id": "rb", "url": "https://x/rb"}
        }
    })));
    let reporter = RecordingReporter::default();
    let sleeps = SleepLog::default();

    install_batch(&options(&[]), &api, &sample_payload(), &reporter, |d| sleeps.record(d))
        .await
        .unwrap();

    assert_eq!(api.calls(), vec!["POST Release 42", "GET https://x/progress"]);
    assert_eq!(reporter.outputs()[0].1, "https://x/rb");
    assert_eq!(reporter.lines().last().map(String::as_str), Some("All packages installed"));
}

#[tokio::test]
async fn test_failed_batch_over_http() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("POST"))
        .and(path("/api/sn_cicd/app/batch/install"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "status": "1",
                "status_label": "Running",
                "percent_complete": 20,
                "links": {
                    "progress": {"id": "p1", "url": format!("{}/progress/p1", uri)},
                    "results": {"id": "r1", "url": format!("{}/results/r1", uri)}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/progress/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "status": "3",
                "status_label": "Failed",
                "status_message": "Batch install failed",
                "percent_complete": 100,
                "links": {}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/results/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "batch_plan": {"id": "plan", "state": "Failed", "url": "https://x/plan"},
                "batch_items": [
                    {"id": "1", "name": "App", "state": "Failed", "status_message": "Bad version"},
                    {"id": "2", "name": "Plugin", "state": "Skipped", "status_message": "Not run"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = options(&[]);
    let client = HttpClient::new(
        format!("{}/api/sn_cicd/app/batch/install", uri),
        opts.credentials.clone(),
    )
    .unwrap();
    let reporter = RecordingReporter::default();

    let err = install_batch(&opts, &client, &sample_payload(), &reporter, |_: Duration| async {})
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Batch install failed\nApp: Failed. Bad version\nPlugin: Skipped. Not run"
    );
    assert_eq!(reporter.lines(), vec!["Running: 20%"]);
}
