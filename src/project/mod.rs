//! Compose project lifecycle
//!
//! `ComposeProject` is the seam between the CLI and whatever actually manages
//! containers. Every method maps one-to-one onto a subcommand; an empty
//! `services` slice means all services of the project.

pub mod context;
pub mod docker;
pub mod info;
pub mod options;

pub use context::ProjectContext;
pub use docker::DockerCompose;
pub use info::{ContainerInfo, InfoSet};
pub use options::{Build, Create, Delete, Down, ImageType, Up};

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Lifecycle operations on a compose project
#[async_trait]
pub trait ComposeProject: Send + Sync {
    /// List the project's containers
    async fn ps(&self, services: &[String]) -> Result<InfoSet>;

    /// Public address bound to `private_port` of a service container
    async fn port(
        &self,
        index: u32,
        protocol: &str,
        service: &str,
        private_port: &str,
    ) -> Result<String>;

    /// Stop containers, waiting `timeout` seconds before killing
    async fn stop(&self, timeout: u32, services: &[String]) -> Result<()>;

    /// Stop and remove containers and networks
    async fn down(&self, options: &Down, services: &[String]) -> Result<()>;

    /// Build service images
    async fn build(&self, options: &Build, services: &[String]) -> Result<()>;

    /// Create containers without starting them
    async fn create(&self, options: &Create, services: &[String]) -> Result<()>;

    /// Create and start containers in the background
    async fn up(&self, options: &Up, services: &[String]) -> Result<()>;

    /// Stream container output until it ends or the future is dropped
    async fn log(&self, follow: bool, services: &[String]) -> Result<()>;

    /// Run a one-off command and return its exit code
    async fn run(&self, service: &str, command: &[String]) -> Result<i32>;

    /// Start existing containers
    async fn start(&self, services: &[String]) -> Result<()>;

    /// Restart containers
    async fn restart(&self, timeout: u32, services: &[String]) -> Result<()>;

    /// Pull service images
    async fn pull(&self, services: &[String]) -> Result<()>;

    /// Remove stopped containers
    async fn delete(&self, options: &Delete, services: &[String]) -> Result<()>;

    /// Send `signal` to containers
    async fn kill(&self, signal: &str, services: &[String]) -> Result<()>;

    /// Pause containers
    async fn pause(&self, services: &[String]) -> Result<()>;

    /// Unpause containers
    async fn unpause(&self, services: &[String]) -> Result<()>;

    /// Set the number of containers per service
    async fn scale(&self, timeout: u32, scale: &BTreeMap<String, u32>) -> Result<()>;
}
