//! Tool-root discovery inside an extraction directory.

use std::path::{Path, PathBuf};

use toolup_core::{Error, Result};
use tracing::debug;

/// Resolve the real tool root inside an extraction directory.
///
/// Release archives wrap the tool in a single directory whose name is
/// generated at archive-build time (e.g. `compiler_20191217082701_67feaceb`),
/// so it cannot be predicted; `nested` selects whether to descend into it.
/// Entries with empty or whitespace-only names are ignored. An empty
/// extraction directory means the archive had an unexpected shape and fails
/// with [`Error::ToolRootNotFound`].
pub fn find_tool_root(extract_path: &Path, nested: bool) -> Result<PathBuf> {
    if !nested {
        return Ok(extract_path.to_path_buf());
    }

    let mut root = None;
    for entry in std::fs::read_dir(extract_path)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().trim().is_empty() {
            continue;
        }
        root = Some(extract_path.join(name));
    }

    match root {
        Some(path) => {
            debug!(root = %path.display(), "found tool root");
            Ok(path)
        }
        None => Err(Error::tool_root_not_found(extract_path)),
    }
}
