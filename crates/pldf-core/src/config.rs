use crate::error::{HintError, Result};
use crate::io::{read_structured, ReadOutcome};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_GENERAL_KEY: &str = "stuck";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project-level settings read from `.pldf/config.yaml`. Every field is
/// optional; a missing file yields the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hint store location, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<PathBuf>,
    /// Resource store location, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<PathBuf>,
    /// Key looked up in the general-hints bucket when no stage entry resolves.
    #[serde(default = "default_general_key")]
    pub general_key: String,
}

fn default_general_key() -> String {
    DEFAULT_GENERAL_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hints: None,
            resources: None,
            general_key: default_general_key(),
        }
    }
}

/// Where the two stores are read from for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocations {
    pub hints: PathBuf,
    pub resources: PathBuf,
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        match read_structured::<Config>(&path) {
            Ok(ReadOutcome::Parsed(cfg)) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Ok(ReadOutcome::Missing) => Ok(Config::default()),
            Err(reason) => Err(HintError::unavailable(&path, reason)),
        }
    }

    /// Resolve store paths. Explicit overrides win over the config file,
    /// which wins over the defaults under `hints/`.
    pub fn locations(
        &self,
        root: &Path,
        hints_override: Option<&Path>,
        resources_override: Option<&Path>,
    ) -> StoreLocations {
        let hints = match (hints_override, &self.hints) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(p)) => paths::under_root(root, p),
            (None, None) => paths::default_hints_path(root),
        };
        let resources = match (resources_override, &self.resources) {
            (Some(p), _) => p.to_path_buf(),
            (None, Some(p)) => paths::under_root(root, p),
            (None, None) => paths::default_resources_path(root),
        };
        StoreLocations { hints, resources }
    }
}
