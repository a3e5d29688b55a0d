use pldf_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `PLDF_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.pldf/`
/// 3. Walk upward from `cwd` looking for `hints/hints.json`
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, |d| d.join(paths::PLDF_DIR).is_dir())
        .or_else(|| find_upward(&cwd, |d| d.join(paths::HINTS_FILE).is_file()))
        .or_else(|| find_upward(&cwd, |d| d.join(".git").is_dir()))
        .unwrap_or(cwd)
}

fn find_upward(start: &Path, is_root: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_root(dir))
        .map(Path::to_path_buf)
}
