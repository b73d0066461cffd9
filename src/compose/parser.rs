//! Compose file parser

use super::config::{ComposeConfig, PortConfig, ServiceConfig};
use crate::error::{KuberError, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Default compose file names, in lookup order
pub const DEFAULT_COMPOSE_FILES: &[&str] = &[
    "compose.yaml",
    "compose.yml",
    "docker-compose.yaml",
    "docker-compose.yml",
];

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$|\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("variable pattern is valid")
});

/// Compose file parser
pub struct ComposeParser;

impl ComposeParser {
    /// Find compose file in directory
    pub fn find_compose_file(dir: &Path) -> Option<PathBuf> {
        DEFAULT_COMPOSE_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Resolve the compose files to load: the explicit list, or the default
    /// file found in `dir`.
    pub fn resolve_files(explicit: &[PathBuf], dir: &Path) -> Result<Vec<PathBuf>> {
        if !explicit.is_empty() {
            return Ok(explicit.iter().map(|f| dir.join(f)).collect());
        }

        Self::find_compose_file(dir)
            .map(|f| vec![f])
            .ok_or_else(|| KuberError::ComposeFileNotFound(dir.to_path_buf()))
    }

    /// Parse compose file from path
    pub fn parse_file(path: &Path) -> Result<ComposeConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KuberError::ComposeParse(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse_str(&content)
    }

    /// Parse compose file from string
    ///
    /// Files without a `services` or `version` key use the legacy layout,
    /// where every top-level key is a service.
    pub fn parse_str(content: &str) -> Result<ComposeConfig> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| KuberError::ComposeParse(format!("Failed to parse YAML: {}", e)))?;

        let legacy = value
            .as_mapping()
            .map(|m| !m.contains_key("services") && !m.contains_key("version"))
            .unwrap_or(false);

        if legacy {
            let services: BTreeMap<String, ServiceConfig> = serde_yaml::from_value(value)
                .map_err(|e| KuberError::ComposeParse(e.to_string()))?;
            return Ok(ComposeConfig {
                services,
                ..Default::default()
            });
        }

        serde_yaml::from_value(value).map_err(|e| KuberError::ComposeParse(e.to_string()))
    }

    /// Parse multiple compose files (with merging)
    pub fn parse_files(paths: &[PathBuf]) -> Result<ComposeConfig> {
        let mut config = ComposeConfig::default();

        for path in paths {
            tracing::debug!("Loading compose file {}", path.display());
            let file_config = Self::parse_file(path)?;
            config = Self::merge_configs(config, file_config);
        }

        Ok(config)
    }

    /// Merge two compose configurations
    pub fn merge_configs(base: ComposeConfig, overlay: ComposeConfig) -> ComposeConfig {
        let mut result = base;

        if overlay.version.is_some() {
            result.version = overlay.version;
        }
        if overlay.name.is_some() {
            result.name = overlay.name;
        }

        for (name, service) in overlay.services {
            if let Some(existing) = result.services.get_mut(&name) {
                if service.image.is_some() {
                    existing.image = service.image;
                }
                if service.build.is_some() {
                    existing.build = service.build;
                }
                if service.ports.is_some() {
                    existing.ports = service.ports;
                }
                if service.restart.is_some() {
                    existing.restart = service.restart;
                }
                existing.extra.extend(service.extra);
            } else {
                result.services.insert(name, service);
            }
        }

        result.networks.extend(overlay.networks);
        result.volumes.extend(overlay.volumes);

        result
    }

    /// Validate compose configuration
    pub fn validate(config: &ComposeConfig) -> Result<()> {
        for (name, service) in &config.services {
            if service.image.is_none() && service.build.is_none() {
                return Err(KuberError::ComposeParse(format!(
                    "Service '{}' must have either 'image' or 'build' specified",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Interpolate variables in image, ports and restart of every service
    pub fn interpolate<F>(config: &mut ComposeConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for service in config.services.values_mut() {
            if let Some(ref mut image) = service.image {
                *image = interpolate_string(image, &lookup);
            }
            if let Some(ref mut restart) = service.restart {
                *restart = interpolate_string(restart, &lookup);
            }
            if let Some(ref mut ports) = service.ports {
                for port in ports.iter_mut() {
                    if let PortConfig::Short(s) = port {
                        *s = interpolate_string(s, &lookup);
                    }
                }
            }
        }
    }

    /// Load, merge, interpolate and validate a set of compose files
    pub fn load(paths: &[PathBuf]) -> Result<ComposeConfig> {
        let mut config = Self::parse_files(paths)?;
        Self::interpolate(&mut config, |key| std::env::var(key).ok());
        Self::validate(&config)?;
        Ok(config)
    }
}

/// Interpolate `$VAR`, `${VAR}` and `${VAR:-default}`; `$$` is a literal `$`
fn interpolate_string<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VARIABLE
        .replace_all(s, |caps: &Captures| {
            if &caps[0] == "$$" {
                return "$".to_string();
            }

            let (var, default) = match caps.get(1) {
                Some(braced) => (braced.as_str(), caps.get(2).map(|d| d.as_str())),
                None => (&caps[3], None),
            };

            match (lookup(var), default) {
                (Some(value), _) => value,
                (None, Some(default)) => default.to_string(),
                (None, None) => {
                    tracing::warn!("The {} variable is not set. Substituting a blank string.", var);
                    String::new()
                }
            }
        })
        .into_owned()
}
