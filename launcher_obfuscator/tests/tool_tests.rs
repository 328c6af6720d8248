mod common;

use std::time::{Duration, Instant};

use common::{ok_output, FakeRunner};
use launcher_obfuscator::errors::ObfuscationError;
use launcher_obfuscator::tool::{run_checked, SystemToolRunner, ToolOutput, ToolRunner};

fn timeout() -> ObfuscationError {
    ObfuscationError::ToolTimeout {
        tool: "strip".into(),
        secs: 1,
    }
}

#[tokio::test]
async fn non_zero_exit_is_reported_with_stderr() {
    let runner = FakeRunner::with_responses(vec![Ok(ToolOutput {
        status: Some(1),
        stdout: String::new(),
        stderr: "no such section".into(),
    })]);
    let err = run_checked(&runner, "strip", &[], 3).await.unwrap_err();
    match err {
        ObfuscationError::ToolFailed { tool, status, stderr } => {
            assert_eq!(tool, "strip");
            assert_eq!(status, Some(1));
            assert_eq!(stderr, "no such section");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn timeout_is_retried() {
    let runner = FakeRunner::with_responses(vec![Err(timeout()), Ok(ok_output())]);
    let out = run_checked(&runner, "strip", &["-s".into()], 1).await.unwrap();
    assert!(out.success());
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn retries_are_bounded() {
    let runner = FakeRunner::with_responses(vec![Err(timeout()), Err(timeout()), Err(timeout())]);
    let err = run_checked(&runner, "strip", &[], 1).await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn spawn_failures_are_not_retried() {
    let runner = FakeRunner::with_responses(vec![Err(ObfuscationError::ToolSpawn {
        tool: "strip".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    })]);
    let err = run_checked(&runner, "strip", &[], 5).await.unwrap_err();
    assert!(matches!(err, ObfuscationError::ToolSpawn { .. }));
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn system_runner_reports_exit_status() {
    let runner = SystemToolRunner::new(Duration::from_secs(10));
    assert!(runner.run("true", &[]).await.unwrap().success());
    let failed = runner.run("false", &[]).await.unwrap();
    assert_eq!(failed.status, Some(1));
}

#[tokio::test]
async fn system_runner_reports_missing_tool() {
    let runner = SystemToolRunner::new(Duration::from_secs(10));
    let err = runner
        .run("definitely-not-an-installed-tool", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ObfuscationError::ToolSpawn { .. }));
}

#[tokio::test]
async fn system_runner_enforces_timeout() {
    let runner = SystemToolRunner::new(Duration::from_millis(200));
    let start = Instant::now();
    let err = runner.run("sleep", &["5".into()]).await.unwrap_err();
    assert!(matches!(err, ObfuscationError::ToolTimeout { .. }));
    assert!(start.elapsed() < Duration::from_secs(4));
}
