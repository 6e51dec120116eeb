//! Cloud CLI client against a scripted stand-in binary
//!
//! Run with: cargo test --test cloud_cli_test

#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use pilvi::cloud::{AwsCliClient, CloudError, CloudProvider};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a fake `aws` that logs its arguments and answers a few commands
fn fake_aws(dir: &Path) -> PathBuf {
    let log = dir.join("calls.log");
    let script = format!(
        r#"#!/bin/sh
echo "$@" >> "{log}"
case "$2" in
  get-caller-identity) echo '{{"Account":"123456789012","Arn":"arn:aws:iam::123456789012:user/dev"}}' ;;
  get-open-id-connect-provider)
    echo "An error occurred (NoSuchEntity) when calling the GetOpenIDConnectProvider operation" >&2
    exit 254 ;;
  delete-secret)
    echo "An error occurred (AccessDeniedException)" >&2
    exit 255 ;;
esac
"#,
        log = log.display()
    );
    let path = dir.join("aws");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_caller_account_id_decodes_json() {
    let dir = TempDir::new().unwrap();
    let client = AwsCliClient::new(
        fake_aws(dir.path()).display().to_string(),
        Some("eu-west-1".to_string()),
    );

    let account = client.caller_account_id().await.unwrap();

    assert_eq!(account, "123456789012");
    assert_eq!(
        calls(dir.path()),
        vec!["sts get-caller-identity --output json --region eu-west-1"]
    );
}

#[tokio::test]
async fn test_missing_provider_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let client = AwsCliClient::new(fake_aws(dir.path()).display().to_string(), None);

    let exists = client
        .oidc_provider_exists("arn:aws:iam::123456789012:oidc-provider/example.com")
        .await
        .unwrap();

    assert!(!exists);
}

#[tokio::test]
async fn test_failed_command_carries_stderr() {
    let dir = TempDir::new().unwrap();
    let client = AwsCliClient::new(fake_aws(dir.path()).display().to_string(), None);

    let err = client
        .delete_secret("arn:aws:secretsmanager:us-east-1:123:secret:key")
        .await
        .unwrap_err();

    match err {
        CloudError::CommandFailed { stderr, .. } => {
            assert_eq!(stderr, "An error occurred (AccessDeniedException)")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_bucket_forces_removal() {
    let dir = TempDir::new().unwrap();
    let client = AwsCliClient::new(fake_aws(dir.path()).display().to_string(), None);

    client.delete_bucket("oidc-abc").await.unwrap();

    assert_eq!(calls(dir.path()), vec!["s3 rb s3://oidc-abc --force"]);
}
