//! Kuber - a compose CLI that can also deploy to Kubernetes
//!
//! Kuber reads compose files and drives the project lifecycle through a
//! pluggable backend. It provides:
//!
//! - Compose file discovery, merging, and variable interpolation
//! - Lifecycle commands (`up`, `down`, `ps`, `scale`, ...) over `docker compose`
//! - Conversion of services to Kubernetes replication controllers and services
//! - Submission of those objects to a cluster API server

pub mod cli;
pub mod cluster;
pub mod compose;
pub mod error;
pub mod logging;
pub mod project;

pub use error::{KuberError, Result};
