use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HintError {
    #[error("invalid stage '{0}': expected one of concept, design, tech, architecture, plan, implement, review")]
    InvalidStage(String),

    #[error("store unavailable at {}: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("no hint found for stage '{0}'")]
    HintNotFound(String),
}

impl HintError {
    pub(crate) fn unavailable(path: &std::path::Path, reason: impl ToString) -> Self {
        HintError::StoreUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HintError>;
