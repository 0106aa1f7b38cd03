//! Core configuration layer for deploy-manager
//!
//! This crate turns three candidate configuration sources into the single
//! typed record the provisioning layer consumes:
//!
//! - **Configuration resolution**: precedence merge of an in-memory override
//!   context, the `config/app-config.json` file, and process environment
//!   variables
//! - **Environment model**: per-environment records ("dev", "release", ...)
//!   extracted verbatim from the merged source, validated lazily
//! - **Stack context**: derived per-environment values (stack name, FQDN,
//!   bucket name) handed to the provisioning layer
//!
//! # Architecture
//!
//! `deploy-core` sits below the CLI and above nothing: it reads local inputs
//! and produces immutable values.
//!
//! ```text
//!        CLI / provisioning
//!               |
//!          deploy-core
//!               |
//!   +-----------+-----------+
//!   |           |           |
//! context   config file   env vars
//! ```
//!
//! # Example
//!
//! ```ignore
//! use deploy_core::{ConfigResolver, StackContext};
//!
//! let config = ConfigResolver::new("/path/to/project").resolve()?;
//! let stack = StackContext::from_resolved(&config, "dev")?;
//! println!("Deploying {} at {}", stack.stack_name, stack.fqdn);
//! ```

pub mod config;
pub mod error;
pub mod stack;

pub use config::{
    ComputePlatform, ConfigResolver, EnvironmentConfig, ImageSource, ResolvedConfig,
    StagingEnvironment, env_vars,
};
pub use error::{Error, Result};
pub use stack::StackContext;
