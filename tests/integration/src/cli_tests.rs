//! CLI integration tests for the `deploy` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn deploy() -> Command {
    let mut cmd = Command::cargo_bin("deploy").expect("deploy binary should be built");
    // Keep resolution deterministic regardless of the host environment
    for var in [
        "DEPLOY_DEFAULT_ACCOUNT",
        "DEPLOY_DEFAULT_REGION",
        "DEPLOY_SERVICE_NAME",
        "DEPLOY_DOMAIN_NAME",
        "DEPLOY_HOSTED_ZONE_ID",
        "DEPLOY_APP_PORT_NUM",
        "DEPLOY_TERMINATION_WAIT_TIME_MINUTES",
        "DEPLOY_ENABLE_TELEMETRY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn setup_project(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("app-config.json"), content).unwrap();
    temp
}

const VALID_CONFIG: &str = r#"{
    "account": "123456789012",
    "region": "us-east-1",
    "serviceName": "demo",
    "domainName": "example.com",
    "dev": {"computePlatform": "ecs", "stagingEnvironment": "dev", "imageTag": "v1"}
}"#;

#[test]
fn show_json_prints_resolved_config() {
    let temp = setup_project(VALID_CONFIG);

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"serviceName\": \"demo\""))
        .stdout(predicate::str::contains("\"appPort\": 3000"));
}

#[test]
fn check_succeeds_for_valid_environment() {
    let temp = setup_project(VALID_CONFIG);

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .args(["check", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn check_fails_for_incomplete_environment() {
    let temp = setup_project(
        r#"{"account": "1", "region": "r", "serviceName": "s", "domainName": "d",
            "dev": {}}"#,
    );

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn missing_required_field_exits_nonzero_with_actionable_error() {
    let temp = TempDir::new().unwrap();

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("account"))
        .stderr(predicate::str::contains("DEPLOY_DEFAULT_ACCOUNT"));
}

#[test]
fn env_vars_supply_missing_scalars() {
    let temp = TempDir::new().unwrap();

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .env("DEPLOY_DEFAULT_ACCOUNT", "env-acct")
        .env("DEPLOY_DEFAULT_REGION", "eu-west-1")
        .env("DEPLOY_SERVICE_NAME", "env-svc")
        .env("DEPLOY_DOMAIN_NAME", "env.example.com")
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"account\": \"env-acct\""));
}

#[test]
fn context_flag_overrides_file_and_env() {
    let temp = setup_project(VALID_CONFIG);

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .args([
            "--context",
            r#"{"account": "ctx", "region": "r", "serviceName": "ctx-svc", "domainName": "d"}"#,
        ])
        .args(["show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"serviceName\": \"ctx-svc\""));
}

#[test]
fn environments_lists_configured_keys() {
    let temp = setup_project(VALID_CONFIG);

    deploy()
        .args(["--root"])
        .arg(temp.path())
        .args(["environments", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"dev\""));
}
