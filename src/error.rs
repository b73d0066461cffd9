//! Error types for Kuber

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Kuber operations
pub type Result<T> = std::result::Result<T, KuberError>;

/// Kuber error types
#[derive(Error, Debug)]
pub enum KuberError {
    #[error("Compose error: {0}")]
    Compose(String),

    #[error("Compose file parse error: {0}")]
    ComposeParse(String),

    #[error("No compose file found in {0}")]
    ComposeFileNotFound(PathBuf),

    #[error("Invalid container port {port} for service {service}")]
    InvalidPort { service: String, port: String },

    #[error("Unknown restart policy {policy} for service {service}")]
    UnknownRestartPolicy { service: String, policy: String },

    #[error("Invalid scale parameter: {0}")]
    InvalidScale(String),

    #[error("K8s api server address isn't defined in {0}")]
    ServerAddressMissing(PathBuf),

    #[error("Failed to read k8s api server address from {path}: {source}")]
    ClusterConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project error: {0}")]
    Project(String),

    #[error("Cluster error: {0}")]
    Cluster(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{message}")]
    Exit { message: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl KuberError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            KuberError::InvalidScale(_) => 2,
            KuberError::Exit { code, .. } => *code,
            _ => 1,
        }
    }
}
