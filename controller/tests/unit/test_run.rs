//! Full invocations: task file on disk through to the orchestrator

use std::path::Path;
use std::time::Duration;

use serde_json::json;

use marathonctl::app::options::DeployOptions;
use marathonctl::app::run::run_with;
use marathonctl::deploy::action::ActionFlags;
use marathonctl::deploy::interpret::Outcome;
use marathonctl::errors::ControllerError;
use marathonctl::http::client::MarathonClient;

use crate::support::{FakeOrchestrator, Recorded};
use crate::test_client::spawn_fake_marathon;

fn write_task(dir: &Path, endpoint: &str, id: &str) -> DeployOptions {
    let task_file = dir.join("marathon.json");
    std::fs::write(
        &task_file,
        format!(
            r#"{{
                "endpoint": "{}",
                "id": "{}",
                "instances": 1,
                "container": {{ "docker": {{ "image": "<%= marathon.image %>" }} }}
            }}"#,
            endpoint, id
        ),
    )
    .unwrap();

    DeployOptions {
        user: "ci".to_string(),
        task_file,
        image: "registry/web:7".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_invalid_scale_issues_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let options = write_task(dir.path(), "http://marathon:8080", "/web");
    let fake = FakeOrchestrator::new();
    let flags = ActionFlags {
        scale: Some("abc".to_string()),
        ..Default::default()
    };

    let result = tokio_test::block_on(run_with(&options, &flags, fake.clone(), "host-a"));
    assert!(matches!(result, Err(ControllerError::InvalidScale(_))));
    assert!(fake.requests().is_empty());
}

#[test]
fn test_status_target_defaults_to_app_id() {
    let dir = tempfile::tempdir().unwrap();
    let options = write_task(dir.path(), "http://marathon:8080", "/web");
    let fake = FakeOrchestrator::new().reply(200, json!({ "app": { "instances": 1, "tasksRunning": 1 } }));
    let flags = ActionFlags {
        status: true,
        ..Default::default()
    };

    let outcome = tokio_test::block_on(run_with(&options, &flags, fake.clone(), "host-a")).unwrap();
    match outcome {
        Outcome::Status(report) => assert_eq!(report.target, "/web"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(
        fake.requests(),
        vec![Recorded::Get("http://marathon:8080/v2/apps//web".to_string())]
    );
}

#[test]
fn test_api_version_option_changes_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = write_task(dir.path(), "http://marathon:8080", "web");
    options.api_version = 3;
    let fake = FakeOrchestrator::new().reply(201, json!({}));

    tokio_test::block_on(run_with(&options, &ActionFlags::default(), fake.clone(), "host-a"))
        .unwrap();
    match &fake.requests()[0] {
        Recorded::Put(url, _) => assert_eq!(url, "http://marathon:8080/v3/apps/web"),
        other => panic!("unexpected request: {:?}", other),
    }
}

#[tokio::test]
async fn test_deploy_end_to_end() {
    let (base, received) = spawn_fake_marathon().await;
    let dir = tempfile::tempdir().unwrap();
    let options = write_task(dir.path(), &base, "web");
    let client = MarathonClient::new(Duration::from_secs(5)).unwrap();

    let outcome = run_with(&options, &ActionFlags::default(), client, "host-a")
        .await
        .unwrap();
    match outcome {
        Outcome::Deployed(deploy) => {
            assert!(deploy.succeeded);
            assert!(deploy.deployment_id.is_some());
            assert!(deploy.version.is_some());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let received = received.lock().unwrap();
    let (id, body) = &received[0];
    assert_eq!(id, "web");
    assert!(body.get("endpoint").is_none());
    assert_eq!(body["container"]["docker"]["image"], "registry/web:7");
    assert_eq!(body["labels"], json!({ "deployedBy": "ci", "deployedFrom": "host-a" }));
}

#[tokio::test]
async fn test_deploy_conflict_end_to_end() {
    let (base, _) = spawn_fake_marathon().await;
    let dir = tempfile::tempdir().unwrap();
    let options = write_task(dir.path(), &base, "locked");
    let client = MarathonClient::new(Duration::from_secs(5)).unwrap();

    let err = run_with(&options, &ActionFlags::default(), client, "host-a")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(409));
    assert_eq!(
        err.message(),
        Some("App is locked by one or more deployments.")
    );
}

#[tokio::test]
async fn test_rollback_end_to_end() {
    let (base, received) = spawn_fake_marathon().await;
    let dir = tempfile::tempdir().unwrap();
    let options = write_task(dir.path(), &base, "web");
    let client = MarathonClient::new(Duration::from_secs(5)).unwrap();
    let flags = ActionFlags {
        rollback: true,
        ..Default::default()
    };

    let outcome = run_with(&options, &flags, client, "host-a").await.unwrap();
    match outcome {
        Outcome::RolledBack(rollback) => {
            assert_eq!(rollback.version, "v2");
            assert_eq!(rollback.status, Some(201));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(received.lock().unwrap()[0].1, json!({ "version": "v2" }));
}
