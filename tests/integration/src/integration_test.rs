//! End-to-end integration test for configuration resolution
//!
//! Exercises the complete flow: source selection -> scalar fallback ->
//! environment extraction -> stack context derivation.

use deploy_core::{ConfigResolver, StackContext, env_vars};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path to the checked-in demo project fixture
fn demo_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects/demo")
}

/// Env lookup closed over a fixed set of variables
fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + 'static {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

/// Set up a project directory with the given app-config.json content
fn setup_project(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("app-config.json"), content).unwrap();
    temp
}

#[test]
fn test_resolve_demo_fixture() {
    let config = ConfigResolver::new(demo_fixture())
        .with_env_lookup(env_from(&[]))
        .resolve()
        .unwrap();

    assert_eq!(config.account, "123456789012");
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.service_name, "demo-service");
    assert_eq!(config.domain_name, "example.com");
    assert_eq!(config.hosted_zone_id, "Z0123456789ABCDEF");
    assert_eq!(config.environment_names(), vec!["dev", "release"]);

    let release = config.environment("release").unwrap();
    assert_eq!(release.image_tag.as_deref(), Some("v1.4.2"));
    assert!(!release.owns_bucket());
}

#[test]
fn test_full_precedence_chain() {
    // File present, env vars present, context present: context wins outright
    let temp = setup_project(
        r#"{"account": "file-acct", "region": "file-region",
            "serviceName": "file-svc", "domainName": "file.example.com"}"#,
    );

    let env = &[
        (env_vars::ACCOUNT, "env-acct"),
        (env_vars::REGION, "env-region"),
        (env_vars::SERVICE_NAME, "env-svc"),
        (env_vars::DOMAIN_NAME, "env.example.com"),
    ];

    let context: Map<String, Value> = json!({
        "account": "ctx-acct",
        "region": "ctx-region",
        "serviceName": "ctx-svc",
        "domainName": "ctx.example.com",
    })
    .as_object()
    .unwrap()
    .clone();

    let config = ConfigResolver::new(temp.path())
        .with_context(context)
        .with_env_lookup(env_from(env))
        .resolve()
        .unwrap();
    assert_eq!(config.account, "ctx-acct");

    // Without context: file wins over env
    let config = ConfigResolver::new(temp.path())
        .with_env_lookup(env_from(env))
        .resolve()
        .unwrap();
    assert_eq!(config.account, "file-acct");

    // Without context or file: env is the last resort
    let empty = TempDir::new().unwrap();
    let config = ConfigResolver::new(empty.path())
        .with_env_lookup(env_from(env))
        .resolve()
        .unwrap();
    assert_eq!(config.account, "env-acct");
}

#[test]
fn test_stack_context_from_fixture() {
    let config = ConfigResolver::new(demo_fixture())
        .with_env_lookup(env_from(&[]))
        .resolve()
        .unwrap();

    let dev = StackContext::from_resolved(&config, "dev").unwrap();
    assert_eq!(dev.stack_name, "demo-service-dev");
    assert_eq!(dev.fqdn, "dev.example.com");
    assert_eq!(dev.bucket_name, "demo-service-dev-artifacts");
    assert!(dev.owns_bucket);
    assert_eq!(dev.app_port, 3000);
    assert_eq!(dev.termination_wait_minutes, 5);

    let release = StackContext::from_resolved(&config, "release").unwrap();
    assert_eq!(release.fqdn, "www.example.com");
    assert_eq!(release.bucket_name, "demo-release-assets");
    assert!(!release.owns_bucket);
    assert_eq!(release.image_tag.as_deref(), Some("v1.4.2"));
}

#[test]
fn test_corrupt_file_degrades_to_env_tier() {
    let temp = setup_project("{ this is not json");

    let config = ConfigResolver::new(temp.path())
        .with_env_lookup(env_from(&[
            (env_vars::ACCOUNT, "env-acct"),
            (env_vars::REGION, "env-region"),
            (env_vars::SERVICE_NAME, "env-svc"),
            (env_vars::DOMAIN_NAME, "env.example.com"),
        ]))
        .resolve()
        .unwrap();

    assert_eq!(config.account, "env-acct");
    assert!(config.environments.is_empty());
}

#[test]
fn test_missing_required_field_aborts_resolution() {
    let empty = TempDir::new().unwrap();

    let err = ConfigResolver::new(empty.path())
        .with_env_lookup(env_from(&[
            // account deliberately unset
            (env_vars::REGION, "env-region"),
            (env_vars::SERVICE_NAME, "env-svc"),
            (env_vars::DOMAIN_NAME, "env.example.com"),
        ]))
        .resolve()
        .unwrap_err();

    let message = format!("{err}");
    assert!(message.contains("account"));
    assert!(message.contains(env_vars::ACCOUNT));
}
