//! Locating a configuration file in the conventional places.

use std::path::{Path, PathBuf};

use crate::defaults::SYSTEM_CONFIG_DIRS;

/// Finds the first existing configuration file called `name`.
///
/// Checks, in order: the user config directory (`$XDG_CONFIG_HOME` or the
/// platform equivalent), `$HOME/.<name>`, the system directories in
/// [`SYSTEM_CONFIG_DIRS`], and finally the current directory. A leading
/// `/` in `name` is ignored.
///
/// Returns `None` if no candidate exists.
#[must_use]
pub fn find_config(name: &str) -> Option<PathBuf> {
    let candidates = candidate_paths(name, dirs::config_dir(), dirs::home_dir());
    let found = first_existing(&candidates);

    match &found {
        Some(path) => tracing::debug!(path = %path.display(), "found config file"),
        None => tracing::debug!(name, tried = candidates.len(), "no config file found"),
    }
    found
}

/// Lists the paths [`find_config`] checks, in order.
///
/// Directories that are unknown on this platform are skipped.
#[must_use]
pub fn candidate_paths(
    name: &str,
    config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let name = name.trim_start_matches('/');
    let mut paths = Vec::with_capacity(SYSTEM_CONFIG_DIRS.len() + 3);

    if let Some(dir) = config_home {
        paths.push(dir.join(name));
    }
    if let Some(dir) = home {
        paths.push(dir.join(format!(".{name}")));
    }
    for dir in SYSTEM_CONFIG_DIRS {
        paths.push(Path::new(dir).join(name));
    }
    paths.push(PathBuf::from(".").join(name));

    paths
}

/// Returns the first of `candidates` that exists.
#[must_use]
pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.exists()).cloned()
}
