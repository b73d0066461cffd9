//! Cluster API address configuration
//!
//! The address lives in a plain text file in the home directory, written by
//! `kuber kuberconfig --host <addr>`.

use crate::error::{KuberError, Result};
use std::path::{Path, PathBuf};

/// File name of the cluster address file
pub const CONFIG_FILE_NAME: &str = ".kuberconfig";

/// Environment variable overriding the API version
pub const API_VERSION_ENV: &str = "KUBE_API_VERSION";

/// API version used when `KUBE_API_VERSION` is unset
pub const DEFAULT_API_VERSION: &str = "v1";

/// Cluster API configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// API server address, e.g. `http://10.0.0.1:8080`
    pub server: String,
    /// Core API version
    pub api_version: String,
}

impl ClusterConfig {
    /// Default location of the address file
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or_else(|| KuberError::InvalidConfig("Cannot determine home directory".to_string()))
    }

    /// Load the server address from `path` and the API version from the environment
    pub fn load(path: &Path) -> Result<Self> {
        let api_version = std::env::var(API_VERSION_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Self::load_with_version(path, api_version)
    }

    /// Load the server address from `path`
    pub fn load_with_version(path: &Path, api_version: String) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| KuberError::ClusterConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let server = content.trim();
        if server.is_empty() {
            return Err(KuberError::ServerAddressMissing(path.to_path_buf()));
        }

        Ok(Self {
            server: normalize_server(server),
            api_version,
        })
    }

    /// Store `host` as the server address in `path`
    pub fn save(path: &Path, host: &str) -> Result<()> {
        let host = host.trim();
        if host.is_empty() {
            return Err(KuberError::InvalidConfig("--host must not be empty".to_string()));
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, format!("{}\n", host))?;
        tracing::debug!("Wrote cluster address {} to {}", host, path.display());
        Ok(())
    }

    /// Base URL of the core API group
    pub fn api_base(&self) -> String {
        format!("{}/api/{}", self.server, self.api_version)
    }
}

/// Add a scheme when missing and drop trailing slashes
fn normalize_server(server: &str) -> String {
    let server = server.trim_end_matches('/');
    if server.contains("://") {
        server.to_string()
    } else {
        format!("http://{}", server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        ClusterConfig::save(&path, "10.0.0.1:8080").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "10.0.0.1:8080\n");

        let config = ClusterConfig::load_with_version(&path, "v1".to_string()).unwrap();
        assert_eq!(config.server, "http://10.0.0.1:8080");
        assert_eq!(config.api_base(), "http://10.0.0.1:8080/api/v1");
    }

    #[test]
    fn test_keeps_scheme() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "https://k8s.example.com/\n").unwrap();

        let config = ClusterConfig::load_with_version(&path, "v1".to_string()).unwrap();
        assert_eq!(config.server, "https://k8s.example.com");
    }

    #[test]
    fn test_missing_and_empty() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        assert!(matches!(
            ClusterConfig::load_with_version(&path, "v1".to_string()),
            Err(KuberError::ClusterConfigRead { .. })
        ));

        std::fs::write(&path, "  \n").unwrap();
        assert!(matches!(
            ClusterConfig::load_with_version(&path, "v1".to_string()),
            Err(KuberError::ServerAddressMissing(_))
        ));
    }
}
