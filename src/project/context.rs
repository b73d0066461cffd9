//! Project identity: name, compose files and parsed descriptor

use crate::compose::{ComposeConfig, ComposeParser};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Fallback when no usable project name can be derived
pub const DEFAULT_PROJECT_NAME: &str = "default";

/// Everything a project backend needs to address one compose project
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Normalized project name
    pub project_name: String,
    /// Compose files, in merge order
    pub files: Vec<PathBuf>,
    /// Directory commands run from
    pub working_dir: PathBuf,
    /// Parsed and merged descriptor
    pub config: ComposeConfig,
}

impl ProjectContext {
    /// Resolve files, parse them, and pick the project name.
    ///
    /// The name is the explicit one, else the descriptor's `name`, else the
    /// working directory's name.
    pub fn resolve(
        files: &[PathBuf],
        project_name: Option<&str>,
        working_dir: &Path,
    ) -> Result<Self> {
        let files = ComposeParser::resolve_files(files, working_dir)?;
        let config = ComposeParser::load(&files)?;

        let raw_name = project_name
            .map(str::to_string)
            .or_else(|| config.name.clone())
            .or_else(|| {
                working_dir
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let project_name = normalize_name(&raw_name);
        tracing::debug!("Project {} from {:?}", project_name, files);

        Ok(Self {
            project_name,
            files,
            working_dir: working_dir.to_path_buf(),
            config,
        })
    }
}

/// Lowercase, keeping only characters valid in a project name
pub fn normalize_name(name: &str) -> String {
    let normalized: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if normalized.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        normalized
    }
}
