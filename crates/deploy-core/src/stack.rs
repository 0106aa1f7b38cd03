//! Derived per-environment stack context
//!
//! The `StackContext` transforms one environment of a resolved configuration
//! into the concrete values the provisioning layer consumes: qualified stack
//! name, fully qualified domain name, effective bucket name, and parsed
//! platform selectors.

use serde::Serialize;
use serde_json::Value;

use crate::config::{ComputePlatform, ImageSource, ResolvedConfig, StagingEnvironment};
use crate::error::{Error, Result};

/// Suffix appended to derived storage bucket names
const BUCKET_SUFFIX: &str = "artifacts";

/// Provisioning inputs for one deployment environment
///
/// All derivation rules live here so the provisioning layer sees only final
/// values:
///
/// - `stack_name`: `<serviceName>-<environment>`
/// - `fqdn`: `<subdomain>.<domainName>`, with the environment key as the
///   subdomain label when none is configured
/// - `bucket_name`: the explicit `bucketName`, else
///   `<serviceName>-<environment>-artifacts`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackContext {
    /// Environment key this context was derived from
    pub environment: String,

    /// Qualified stack/service name
    pub stack_name: String,

    /// Fully qualified domain name served by this environment
    pub fqdn: String,

    /// Compute platform to provision onto
    pub platform: ComputePlatform,

    /// Staging label
    pub staging: StagingEnvironment,

    /// Image registry, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_source: Option<ImageSource>,

    /// Image repository identifier, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    /// Image tag, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,

    /// Port the container listens on
    pub app_port: u16,

    /// Minutes the deployment service waits before terminating the old fleet
    pub termination_wait_minutes: u32,

    /// Effective storage bucket name
    pub bucket_name: String,

    /// Whether this system owns the bucket lifecycle
    pub owns_bucket: bool,

    /// Container health-check command, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_command: Option<Vec<String>>,

    /// Load balancer health-check path, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,

    /// DNS zone identifier; empty when unset
    pub hosted_zone_id: String,

    /// Whether the telemetry sidecar is enabled
    pub enable_telemetry: bool,
}

impl StackContext {
    /// Derive the stack context for one environment
    ///
    /// Validates the environment entry on behalf of the provisioning layer
    /// (the resolver passes entries through unvalidated).
    ///
    /// # Arguments
    ///
    /// * `config` - The resolved configuration
    /// * `name` - Environment key to derive from
    ///
    /// # Returns
    ///
    /// The derived context, [`Error::UnknownEnvironment`] when the key does
    /// not exist, or [`Error::InvalidEnvironment`] when the entry is missing
    /// required fields.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use deploy_core::{ConfigResolver, StackContext};
    ///
    /// let config = ConfigResolver::new(".").resolve()?;
    /// let stack = StackContext::from_resolved(&config, "dev")?;
    /// assert_eq!(stack.stack_name, format!("{}-dev", config.service_name));
    /// ```
    pub fn from_resolved(config: &ResolvedConfig, name: &str) -> Result<Self> {
        let env = config
            .environment(name)
            .ok_or_else(|| Error::UnknownEnvironment {
                name: name.to_string(),
            })?;
        env.validate(name)?;

        // validate() guarantees both selectors parse; the ok_or_else arms
        // keep this total without unwrap
        let platform = env.platform().ok_or_else(|| Error::InvalidEnvironment {
            name: name.to_string(),
            reason: "computePlatform is not set".to_string(),
        })?;
        let staging = env.staging().ok_or_else(|| Error::InvalidEnvironment {
            name: name.to_string(),
            reason: "stagingEnvironment is not set".to_string(),
        })?;

        let subdomain = env.subdomain.as_deref().unwrap_or(name);
        let bucket_name = env.bucket_name.clone().unwrap_or_else(|| {
            format!("{}-{}-{}", config.service_name, name, BUCKET_SUFFIX)
        });

        Ok(Self {
            environment: name.to_string(),
            stack_name: format!("{}-{}", config.service_name, name),
            fqdn: format!("{}.{}", subdomain, config.domain_name),
            platform,
            staging,
            image_source: env.registry(),
            repository_name: env.repository_name.clone(),
            image_tag: env.image_tag.clone(),
            app_port: config.app_port,
            termination_wait_minutes: config.termination_wait_minutes,
            bucket_name,
            owns_bucket: env.owns_bucket(),
            health_check_command: env.health_check_command.clone(),
            health_check_path: env.health_check_path.clone(),
            hosted_zone_id: config.hosted_zone_id.clone(),
            enable_telemetry: config.enable_telemetry.unwrap_or(false),
        })
    }

    /// Convert the stack context to a JSON value
    ///
    /// This is useful for handing the context to external provisioning
    /// tooling.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}
