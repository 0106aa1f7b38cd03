//! Configuration resolution with fixed source precedence
//!
//! The `ConfigResolver` selects exactly one base configuration source
//! (in-memory context, else the config file), applies per-field environment
//! variable fallback for scalars, and validates the required fields before
//! returning a [`ResolvedConfig`].

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::model::EnvironmentConfig;

/// Relative path of the configuration file within the project root
pub const CONFIG_PATH: &str = "config/app-config.json";

/// Default application port when no source supplies one
pub const DEFAULT_APP_PORT: u16 = 3000;

/// Default blue/green termination wait in minutes
pub const DEFAULT_TERMINATION_WAIT_MINUTES: u32 = 5;

/// Environment variable names for the scalar fallback tier
pub mod env_vars {
    pub const ACCOUNT: &str = "DEPLOY_DEFAULT_ACCOUNT";
    pub const REGION: &str = "DEPLOY_DEFAULT_REGION";
    pub const SERVICE_NAME: &str = "DEPLOY_SERVICE_NAME";
    pub const DOMAIN_NAME: &str = "DEPLOY_DOMAIN_NAME";
    pub const HOSTED_ZONE_ID: &str = "DEPLOY_HOSTED_ZONE_ID";
    pub const APP_PORT: &str = "DEPLOY_APP_PORT_NUM";
    pub const TERMINATION_WAIT_MINUTES: &str = "DEPLOY_TERMINATION_WAIT_TIME_MINUTES";
    pub const ENABLE_TELEMETRY: &str = "DEPLOY_ENABLE_TELEMETRY";
}

/// Top-level keys consumed as scalars; everything else is an environment entry
const RESERVED_KEYS: [&str; 8] = [
    "account",
    "region",
    "serviceName",
    "domainName",
    "hostedZoneId",
    "appPort",
    "terminationWaitTimeMinutes",
    "enableTelemetry",
];

/// The final resolved configuration after source selection and fallback
///
/// This is the output of the configuration resolution process and the
/// contract the provisioning layer consumes. Constructed fresh per
/// resolution, never mutated afterward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Cloud account identifier
    pub account: String,

    /// Cloud region identifier
    pub region: String,

    /// Service name used to derive stack and resource names
    pub service_name: String,

    /// Apex domain name environments hang subdomains off
    pub domain_name: String,

    /// DNS zone identifier; empty when absent from every source
    pub hosted_zone_id: String,

    /// Application port the container listens on
    pub app_port: u16,

    /// Minutes the deployment service waits before terminating the old fleet
    pub termination_wait_minutes: u32,

    /// Opt-in telemetry sidecar flag; absent when no source set it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_telemetry: Option<bool>,

    /// Per-environment configurations keyed by their top-level key
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl ResolvedConfig {
    /// Look up an environment by key
    pub fn environment(&self, name: &str) -> Option<&EnvironmentConfig> {
        self.environments.get(name)
    }

    /// Environment keys in sorted order, for deterministic output
    pub fn environment_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.environments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Environment variable lookup injected into the resolver
///
/// Resolution stays a pure function of its inputs: tests swap in a closure
/// over a map instead of mutating real process state.
type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Resolves configuration from context, file, and environment variables
///
/// Source precedence is coarse for the base bag and per-field for scalars:
///
/// 1. A non-empty in-memory context is the **sole** base source; the file
///    and environment variables are not consulted for the base bag
/// 2. Otherwise the config file supplies the base bag; a missing file means
///    an empty base, and a malformed file is logged and treated as empty
/// 3. Each scalar field missing from the base bag falls back to its named
///    environment variable, then to a default where one exists
pub struct ConfigResolver {
    /// In-memory override context; suppresses file and env when non-empty
    context: Option<Map<String, Value>>,

    /// Path to the configuration file
    config_path: PathBuf,

    /// Environment variable lookup
    env_lookup: EnvLookup,
}

impl ConfigResolver {
    /// Create a resolver for the given project root
    ///
    /// Reads `config/app-config.json` under the root and the real process
    /// environment.
    ///
    /// # Arguments
    ///
    /// * `root` - Project root directory containing `config/`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            context: None,
            config_path: root.as_ref().join(CONFIG_PATH),
            env_lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Supply an in-memory override context
    ///
    /// A non-empty context becomes the sole base source: it represents an
    /// already-fully-specified override (CLI flag, test harness) and is
    /// never partially merged with file or environment values.
    #[must_use]
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    /// Override the configuration file path
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Override the environment variable lookup
    ///
    /// This is primarily useful for testing, where you need deterministic
    /// environment values without mutating real process state.
    #[must_use]
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.env_lookup = Box::new(lookup);
        self
    }

    /// Resolve the configuration
    ///
    /// Selects the base source, applies per-field environment fallback for
    /// scalars, validates the required fields, and extracts every
    /// non-reserved top-level key as an environment entry.
    ///
    /// # Returns
    ///
    /// The resolved configuration, or [`Error::MissingRequiredField`] naming
    /// the first required scalar absent from every source. No partial config
    /// is ever returned.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (base, env_tier) = self.base_source();

        let account = require(
            self.string_field(&base, "account", env_vars::ACCOUNT, env_tier),
            "account",
            env_vars::ACCOUNT,
        )?;
        let region = require(
            self.string_field(&base, "region", env_vars::REGION, env_tier),
            "region",
            env_vars::REGION,
        )?;
        let service_name = require(
            self.string_field(&base, "serviceName", env_vars::SERVICE_NAME, env_tier),
            "serviceName",
            env_vars::SERVICE_NAME,
        )?;
        let domain_name = require(
            self.string_field(&base, "domainName", env_vars::DOMAIN_NAME, env_tier),
            "domainName",
            env_vars::DOMAIN_NAME,
        )?;

        let hosted_zone_id = self
            .string_field(&base, "hostedZoneId", env_vars::HOSTED_ZONE_ID, env_tier)
            .unwrap_or_default();
        let app_port = self
            .u64_field(&base, "appPort", env_vars::APP_PORT, env_tier)
            .and_then(|n| {
                u16::try_from(n)
                    .inspect_err(|_| tracing::warn!(value = n, "appPort out of range; using default"))
                    .ok()
            })
            .unwrap_or(DEFAULT_APP_PORT);
        let termination_wait_minutes = self
            .u64_field(
                &base,
                "terminationWaitTimeMinutes",
                env_vars::TERMINATION_WAIT_MINUTES,
                env_tier,
            )
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_TERMINATION_WAIT_MINUTES);
        let enable_telemetry =
            self.bool_field(&base, "enableTelemetry", env_vars::ENABLE_TELEMETRY, env_tier);

        let mut environments = HashMap::new();
        for (key, value) in &base {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            environments.insert(key.clone(), EnvironmentConfig::from_value(value));
        }

        Ok(ResolvedConfig {
            account,
            region,
            service_name,
            domain_name,
            hosted_zone_id,
            app_port,
            termination_wait_minutes,
            enable_telemetry,
            environments,
        })
    }

    /// Select the base configuration bag
    ///
    /// Non-empty context wins outright and disables the environment tier
    /// entirely (the context is an already-fully-specified override, never
    /// a partial one). Otherwise the config file is read; a missing file
    /// yields an empty bag, and a malformed file is logged loudly but
    /// degrades to an empty bag so the environment variable tier can still
    /// produce a usable configuration.
    ///
    /// Returns the bag and whether the environment tier applies.
    fn base_source(&self) -> (Map<String, Value>, bool) {
        if let Some(context) = &self.context
            && !context.is_empty()
        {
            tracing::debug!("Using in-memory context as the sole configuration source");
            return (context.clone(), false);
        }

        let map = match fs::read_to_string(&self.config_path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => {
                    tracing::debug!(path = ?self.config_path, "Loaded configuration file");
                    map
                }
                Ok(_) => {
                    tracing::error!(
                        path = ?self.config_path,
                        "Configuration file is not a JSON object; falling back to environment variables"
                    );
                    Map::new()
                }
                Err(error) => {
                    tracing::error!(
                        path = ?self.config_path,
                        %error,
                        "Failed to parse configuration file; falling back to environment variables"
                    );
                    Map::new()
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = ?self.config_path,
                    "No configuration file found; using environment variables"
                );
                Map::new()
            }
            Err(error) => {
                tracing::warn!(
                    path = ?self.config_path,
                    %error,
                    "Could not read configuration file; falling back to environment variables"
                );
                Map::new()
            }
        };
        (map, true)
    }

    /// Look up an environment variable, unless the env tier is disabled
    fn env_value(&self, env_var: &str, env_tier: bool) -> Option<String> {
        if env_tier { (self.env_lookup)(env_var) } else { None }
    }

    /// Resolve a string scalar: base bag value, else environment variable
    fn string_field(
        &self,
        base: &Map<String, Value>,
        key: &str,
        env_var: &str,
        env_tier: bool,
    ) -> Option<String> {
        if let Some(value) = base.get(key) {
            if let Some(s) = value.as_str() {
                return Some(s.to_owned());
            }
            tracing::warn!(key, "Configuration value is not a string; ignoring");
        }
        self.env_value(env_var, env_tier)
    }

    /// Resolve a numeric scalar: base bag value, else parsed environment variable
    fn u64_field(
        &self,
        base: &Map<String, Value>,
        key: &str,
        env_var: &str,
        env_tier: bool,
    ) -> Option<u64> {
        if let Some(value) = base.get(key) {
            if let Some(n) = value.as_u64() {
                return Some(n);
            }
            tracing::warn!(key, "Configuration value is not a number; ignoring");
        }
        let raw = self.env_value(env_var, env_tier)?;
        match raw.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(env_var, value = %raw, "Environment value is not a number; ignoring");
                None
            }
        }
    }

    /// Resolve a boolean scalar: base bag value, else parsed environment variable
    fn bool_field(
        &self,
        base: &Map<String, Value>,
        key: &str,
        env_var: &str,
        env_tier: bool,
    ) -> Option<bool> {
        if let Some(value) = base.get(key) {
            if let Some(b) = value.as_bool() {
                return Some(b);
            }
            tracing::warn!(key, "Configuration value is not a boolean; ignoring");
        }
        let raw = self.env_value(env_var, env_tier)?;
        match raw.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => {
                tracing::warn!(env_var, value = %raw, "Environment value is not a boolean; ignoring");
                None
            }
        }
    }
}

/// Enforce a required scalar, naming the field and its environment variable
fn require(value: Option<String>, field: &'static str, env_var: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingRequiredField { field, env_var }),
    }
}
