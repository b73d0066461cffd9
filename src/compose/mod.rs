//! Compose file model and loading
//!
//! The lifecycle commands hand compose files straight to the project backend;
//! this module exists for the cluster conversion, which needs the parsed
//! services.

pub mod config;
pub mod parser;

pub use config::{ComposeConfig, PortConfig, ServiceConfig};
pub use parser::ComposeParser;
