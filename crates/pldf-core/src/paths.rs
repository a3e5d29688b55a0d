use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PLDF_DIR: &str = ".pldf";
pub const CONFIG_FILE: &str = ".pldf/config.yaml";

pub const HINTS_DIR: &str = "hints";
pub const HINTS_FILE: &str = "hints/hints.json";
pub const RESOURCES_FILE: &str = "hints/resources.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn pldf_dir(root: &Path) -> PathBuf {
    root.join(PLDF_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn default_hints_path(root: &Path) -> PathBuf {
    root.join(HINTS_FILE)
}

pub fn default_resources_path(root: &Path) -> PathBuf {
    root.join(RESOURCES_FILE)
}

/// Anchor `path` at `root` unless it is already absolute.
pub fn under_root(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_hints_dir() {
        let root = Path::new("/proj");
        assert_eq!(
            default_hints_path(root),
            PathBuf::from("/proj/hints/hints.json")
        );
        assert_eq!(
            default_resources_path(root),
            PathBuf::from("/proj/hints/resources.json")
        );
    }

    #[test]
    fn under_root_keeps_absolute_paths() {
        let root = Path::new("/proj");
        let abs = std::env::temp_dir().join("kb.json");
        assert_eq!(under_root(root, &abs), abs);
        assert_eq!(
            under_root(root, Path::new("kb/h.yaml")),
            PathBuf::from("/proj/kb/h.yaml")
        );
    }
}
