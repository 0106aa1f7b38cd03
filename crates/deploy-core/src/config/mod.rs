//! Configuration resolution for deployment environments
//!
//! This module merges configuration from multiple candidate sources into one
//! validated record, with a fixed precedence order.
//!
//! # Configuration Precedence
//!
//! Exactly one base source is selected, then per-field fallback applies:
//!
//! 1. **In-memory context** - if a non-empty override context was supplied,
//!    it is the sole source; file and environment variables are not consulted
//! 2. **Configuration file** - `config/app-config.json` under the project
//!    root; a missing file degrades to the next tier
//! 3. **Environment variables** - one variable per scalar field
//!    (e.g. `DEPLOY_DEFAULT_ACCOUNT`), consulted per field when the base
//!    source did not supply a value
//!
//! # Environments
//!
//! Every top-level key of the base source that is not a reserved scalar name
//! is treated as a deployment environment entry:
//!
//! ```json
//! {
//!   "account": "123456789012",
//!   "region": "us-east-1",
//!   "serviceName": "demo-service",
//!   "domainName": "example.com",
//!   "dev": { "computePlatform": "ecs", "stagingEnvironment": "dev" },
//!   "release": { "computePlatform": "ecs", "stagingEnvironment": "release" }
//! }
//! ```
//!
//! Environment entries are passed through verbatim; their invariants are
//! enforced lazily by consumers (see [`crate::stack::StackContext`]).
//!
//! # Example
//!
//! ```ignore
//! use deploy_core::config::ConfigResolver;
//!
//! let resolver = ConfigResolver::new("/path/to/project");
//! let config = resolver.resolve()?;
//! println!("Service: {}", config.service_name);
//! ```

mod model;
mod resolver;

pub use model::{ComputePlatform, EnvironmentConfig, ImageSource, StagingEnvironment};
pub use resolver::{
    CONFIG_PATH, ConfigResolver, DEFAULT_APP_PORT, DEFAULT_TERMINATION_WAIT_MINUTES,
    ResolvedConfig, env_vars,
};
