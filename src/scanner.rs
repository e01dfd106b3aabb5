use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// File name the chat client gives its JSON export.
pub const EXPORT_FILE_NAME: &str = "result.json";

/// Export directories nest the JSON at most this deep.
const MAX_SCAN_DEPTH: usize = 3;

/// Resolve `--input` to the export JSON file.
///
/// A file path is returned as is. A directory is searched for
/// `result.json`; with several hits the first in path order wins.
pub fn resolve_input(input: &Path) -> Result<PathBuf> {
    if !input.is_dir() {
        return Ok(input.to_path_buf());
    }

    let found = find_exports(input);
    match found.as_slice() {
        [] => bail!(
            "no {EXPORT_FILE_NAME} found under {} (searched {MAX_SCAN_DEPTH} levels)",
            input.display()
        ),
        [only] => Ok(only.clone()),
        [first, ..] => {
            warn!(
                count = found.len(),
                using = %first.display(),
                "several exports found, using the first"
            );
            Ok(first.clone())
        }
    }
}

/// Every `result.json` under `root`, sorted by path.
pub fn find_exports(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == EXPORT_FILE_NAME)
        .map(|e| e.into_path())
        .collect();
    found.sort();
    debug!(root = %root.display(), hits = found.len(), "scanned for exports");
    found
}
