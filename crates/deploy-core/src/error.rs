//! Error types for deploy-core

/// Result type for deploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deploy-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required scalar field was absent from every configuration source
    #[error(
        "Missing required configuration field `{field}`. Provide it in the config file or set the {env_var} environment variable"
    )]
    MissingRequiredField {
        field: &'static str,
        env_var: &'static str,
    },

    /// No environment with the given key exists in the resolved configuration
    #[error("Unknown deployment environment: {name}")]
    UnknownEnvironment { name: String },

    /// An environment entry is missing fields the provisioning layer needs
    #[error("Environment `{name}` is not provisionable: {reason}")]
    InvalidEnvironment { name: String, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
