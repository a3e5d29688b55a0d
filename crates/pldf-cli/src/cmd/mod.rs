pub mod check;
pub mod hint;
pub mod list;
pub mod stages;

use anyhow::Context;
use pldf_core::{config::Config, HintStore, ResourceStore};
use std::path::{Path, PathBuf};

/// A failure whose details were already written to stdout as JSON.
#[derive(Debug)]
pub struct AlreadyReported(pub &'static str);

impl std::fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for AlreadyReported {}

/// Where to read the knowledge base from, as given on the command line.
pub struct Sources {
    pub root: PathBuf,
    pub hints: Option<PathBuf>,
    pub resources: Option<PathBuf>,
}

/// One immutable snapshot of the config and both stores.
pub struct KnowledgeBase {
    pub config: Config,
    pub hints: HintStore,
    pub resources: ResourceStore,
}

impl Sources {
    pub fn load(&self) -> anyhow::Result<KnowledgeBase> {
        let config = Config::load(&self.root).context("failed to load config")?;
        let locations = config.locations(
            &self.root,
            self.hints.as_deref(),
            self.resources.as_deref(),
        );
        let hints = HintStore::load(&locations.hints).context("failed to load hints")?;
        let resources =
            ResourceStore::load(&locations.resources).context("failed to load resources")?;
        Ok(KnowledgeBase {
            config,
            hints,
            resources,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
