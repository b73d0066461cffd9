//! Option values passed to project operations

use crate::error::{KuberError, Result};
use std::str::FromStr;

/// Images removed by `down`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageType {
    /// Keep all images
    #[default]
    None,
    /// Remove images without a custom tag
    Local,
    /// Remove every image used by a service
    All,
}

impl FromStr for ImageType {
    type Err = KuberError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "none" => Ok(ImageType::None),
            "local" => Ok(ImageType::Local),
            "all" => Ok(ImageType::All),
            other => Err(KuberError::Project(format!(
                "--rmi flag must be local, all or empty, got {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageType::None => write!(f, "none"),
            ImageType::Local => write!(f, "local"),
            ImageType::All => write!(f, "all"),
        }
    }
}

/// Options for `down`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Down {
    pub remove_volume: bool,
    /// `--rmi` as given; the backend parses it into an `ImageType`
    pub remove_images: String,
    pub remove_orphans: bool,
}

/// Options for `build`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Build {
    pub no_cache: bool,
    pub force_remove: bool,
    pub pull: bool,
}

/// Options for `create`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Create {
    pub no_recreate: bool,
    pub force_recreate: bool,
    pub no_build: bool,
}

impl Create {
    /// Reject contradictory recreate flags
    pub fn validate(&self) -> Result<()> {
        if self.no_recreate && self.force_recreate {
            return Err(KuberError::Project(
                "no-recreate and force-recreate cannot be combined".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for `up`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Up {
    pub create: Create,
}

/// Asked with the stopped containers before `delete` removes them; removal
/// goes ahead only when it returns true.
pub type BeforeDelete = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Options for `delete`
#[derive(Default)]
pub struct Delete {
    pub remove_volume: bool,
    pub before_delete: Option<BeforeDelete>,
}

impl std::fmt::Debug for Delete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delete")
            .field("remove_volume", &self.remove_volume)
            .field("before_delete", &self.before_delete.is_some())
            .finish()
    }
}
