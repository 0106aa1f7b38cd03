//! Per-environment configuration model
//!
//! An [`EnvironmentConfig`] is the verbatim projection of one nested entry of
//! the merged configuration source. Extraction is total: any field that is
//! missing or has the wrong shape becomes `None`, and required-field
//! enforcement is deferred to consumers via [`EnvironmentConfig::validate`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Compute platform an environment deploys onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputePlatform {
    /// Container orchestration service with blue/green traffic shifting
    Ecs,
    /// Fully managed container runtime
    AppRunner,
}

impl ComputePlatform {
    /// Parse a raw config value, returning `None` for unrecognized input
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ecs" => Some(Self::Ecs),
            "apprunner" => Some(Self::AppRunner),
            _ => None,
        }
    }
}

impl fmt::Display for ComputePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecs => write!(f, "ecs"),
            Self::AppRunner => write!(f, "apprunner"),
        }
    }
}

/// Staging label an environment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagingEnvironment {
    Dev,
    Release,
}

impl StagingEnvironment {
    /// Parse a raw config value, returning `None` for unrecognized input
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dev" => Some(Self::Dev),
            "release" => Some(Self::Release),
            _ => None,
        }
    }
}

impl fmt::Display for StagingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Release => write!(f, "release"),
        }
    }
}

/// Registry the container image is pulled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    /// Private registry in the same cloud account
    Ecr,
    /// Public Docker Hub repository
    DockerHub,
}

impl ImageSource {
    /// Parse a raw config value, returning `None` for unrecognized input
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ecr" => Some(Self::Ecr),
            "dockerhub" => Some(Self::DockerHub),
            _ => None,
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecr => write!(f, "ecr"),
            Self::DockerHub => write!(f, "dockerhub"),
        }
    }
}

/// Configuration for one deployment environment (e.g. "dev", "release")
///
/// All fields are optional at this level: the extractor passes through
/// whatever the source supplied. `computePlatform` and `stagingEnvironment`
/// must be present and recognized before the entry can drive provisioning,
/// which [`validate`](Self::validate) checks on behalf of consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentConfig {
    /// Compute platform selector ("ecs" or "apprunner")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_platform: Option<String>,

    /// Staging label ("dev" or "release")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_environment: Option<String>,

    /// Image registry selector ("ecr" or "dockerhub")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,

    /// Image repository identifier within the registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,

    /// Image tag to deploy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,

    /// Container health-check command (argv form)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_command: Option<Vec<String>>,

    /// HTTP path probed by the load balancer health check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_path: Option<String>,

    /// Explicit storage bucket name; derived from the service name when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,

    /// Whether this system owns the bucket lifecycle (defaults to true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_bucket: Option<bool>,

    /// Subdomain label; falls back to the environment key when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
}

impl EnvironmentConfig {
    /// Extract an environment config from a raw JSON value
    ///
    /// Total over all input shapes: non-object values produce an empty
    /// config, and fields with unexpected types are dropped. This operation
    /// never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use deploy_core::config::EnvironmentConfig;
    /// use serde_json::json;
    ///
    /// let env = EnvironmentConfig::from_value(&json!({
    ///     "computePlatform": "ecs",
    ///     "imageTag": "v1",
    /// }));
    /// assert_eq!(env.compute_platform.as_deref(), Some("ecs"));
    /// assert_eq!(env.image_tag.as_deref(), Some("v1"));
    /// assert!(env.subdomain.is_none());
    /// ```
    pub fn from_value(raw: &Value) -> Self {
        let string = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            compute_platform: string("computePlatform"),
            staging_environment: string("stagingEnvironment"),
            image_source: string("imageSource"),
            repository_name: string("repositoryName"),
            image_tag: string("imageTag"),
            health_check_command: raw
                .get("healthCheckCommand")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                }),
            health_check_path: string("healthCheckPath"),
            bucket_name: string("bucketName"),
            create_bucket: raw.get("createBucket").and_then(Value::as_bool),
            subdomain: string("subdomain"),
        }
    }

    /// Parsed compute platform, if present and recognized
    pub fn platform(&self) -> Option<ComputePlatform> {
        self.compute_platform.as_deref().and_then(ComputePlatform::parse)
    }

    /// Parsed staging label, if present and recognized
    pub fn staging(&self) -> Option<StagingEnvironment> {
        self.staging_environment
            .as_deref()
            .and_then(StagingEnvironment::parse)
    }

    /// Parsed image registry, if present and recognized
    pub fn registry(&self) -> Option<ImageSource> {
        self.image_source.as_deref().and_then(ImageSource::parse)
    }

    /// Whether this system creates and destroys the storage bucket
    ///
    /// Absent means true: the bucket lifecycle is owned here unless the
    /// config explicitly opts out (pre-existing bucket).
    pub fn owns_bucket(&self) -> bool {
        self.create_bucket.unwrap_or(true)
    }

    /// Check that this entry can drive provisioning
    ///
    /// The resolver is schema-light and passes entries through verbatim;
    /// consumers call this before acting on one. Requires a recognized
    /// compute platform and staging label.
    ///
    /// # Arguments
    ///
    /// * `name` - Environment key, used in error messages
    pub fn validate(&self, name: &str) -> Result<()> {
        match self.compute_platform.as_deref() {
            None => {
                return Err(Error::InvalidEnvironment {
                    name: name.to_string(),
                    reason: "computePlatform is not set".to_string(),
                });
            }
            Some(value) if ComputePlatform::parse(value).is_none() => {
                return Err(Error::InvalidEnvironment {
                    name: name.to_string(),
                    reason: format!("unrecognized computePlatform `{value}`"),
                });
            }
            Some(_) => {}
        }

        match self.staging_environment.as_deref() {
            None => Err(Error::InvalidEnvironment {
                name: name.to_string(),
                reason: "stagingEnvironment is not set".to_string(),
            }),
            Some(value) if StagingEnvironment::parse(value).is_none() => {
                Err(Error::InvalidEnvironment {
                    name: name.to_string(),
                    reason: format!("unrecognized stagingEnvironment `{value}`"),
                })
            }
            Some(_) => Ok(()),
        }
    }
}
