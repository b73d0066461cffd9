//! Compose file configuration types
//!
//! Only the fields the cluster conversion reads are typed. Everything else a
//! compose file may carry is kept as raw YAML and survives a merge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compose file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Compose file version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Services, keyed by service name
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
    /// Networks
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub networks: BTreeMap<String, serde_yaml::Value>,
    /// Volumes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volumes: BTreeMap<String, serde_yaml::Value>,
}

/// Service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Image name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Build configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildConfig>,
    /// Port mappings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<PortConfig>>,
    /// Restart policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    /// Remaining service keys, untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuildConfig {
    /// Simple context path
    Simple(String),
    /// Full build configuration
    Full(BuildConfigFull),
}

/// Full build configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfigFull {
    /// Build context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Dockerfile path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
    /// Build arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<BTreeMap<String, String>>,
}

/// Port configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortConfig {
    /// Bare number: `80`
    Number(u32),
    /// Short syntax: `"80"` or `"8080:80"`
    Short(String),
    /// Long syntax
    Long(PortConfigLong),
}

/// Long port configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfigLong {
    /// Target port in container
    pub target: u32,
    /// Published port on host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Protocol (tcp/udp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl std::fmt::Display for PortConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortConfig::Number(n) => write!(f, "{}", n),
            PortConfig::Short(s) => write!(f, "{}", s),
            PortConfig::Long(long) => write!(f, "{}", long.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_syntaxes() {
        let yaml = r#"
image: nginx
ports:
  - 80
  - "443"
  - "8080:8080"
  - target: 9000
    published: "9001"
"#;
        let service: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        let ports = service.ports.unwrap();
        assert_eq!(ports[0], PortConfig::Number(80));
        assert_eq!(ports[1], PortConfig::Short("443".to_string()));
        assert_eq!(ports[2], PortConfig::Short("8080:8080".to_string()));
        assert!(matches!(&ports[3], PortConfig::Long(l) if l.target == 9000));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let yaml = r#"
image: redis
environment:
  MODE: cache
"#;
        let service: ServiceConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(service.extra.contains_key("environment"));

        let out = serde_yaml::to_string(&service).unwrap();
        assert!(out.contains("MODE: cache"));
    }
}
