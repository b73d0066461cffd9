//! Kubernetes deployment of compose services
//!
//! Each compose service becomes one replication controller and one service
//! sharing the `service=<name>` selector.

pub mod client;
pub mod config;
pub mod convert;
pub mod deploy;
pub mod resources;

pub use client::{ClusterClient, HttpClusterClient};
pub use config::ClusterConfig;
pub use convert::{convert_project, convert_service, ClusterResources};
pub use deploy::{submit, write_manifests, DeployReport};
pub use resources::{ReplicationController, RestartPolicy, Service};
