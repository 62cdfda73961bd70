//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Expand a leading `~` against the given home directory.
///
/// Paths without a tilde, or any path when no home directory is known, are
/// returned unchanged.
pub fn expand_path(path: impl AsRef<Path>, home: Option<&Path>) -> PathBuf {
    let path = path.as_ref();

    if let (Ok(stripped), Some(home)) = (path.strip_prefix("~"), home) {
        return home.join(stripped);
    }

    path.to_path_buf()
}
