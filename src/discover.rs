//! Swagger document discovery
//!
//! Each root directory is expected to carry a top-level `api/` subdirectory
//! with the per-service documents somewhere beneath it. The union of all
//! discovered paths is sorted before merging; that order is the only thing
//! making the last-write-wins fold deterministic, so it is preserved in a
//! dedicated type that downstream stages accept as-is.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{MergeError, Result};

/// Suffix identifying a per-service Swagger document.
pub const SWAGGER_SUFFIX: &str = ".swagger.json";

/// Document paths in the exact order the merge fold consumes them.
///
/// Only discovery constructs this. The sort is plain string comparison on
/// the full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedDocumentPaths(Vec<PathBuf>);

impl SortedDocumentPaths {
    fn from_unsorted(mut paths: Vec<PathBuf>) -> Self {
        paths.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
        Self(paths)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Recursively enumerate every Swagger document beneath `<root>/api`.
///
/// Entry order carries no guarantee. A missing or unreadable `api`
/// subdirectory is fatal.
pub fn find_swagger_files(root: &Path) -> Result<Vec<PathBuf>> {
    let api_dir = root.join("api");
    let mut results = Vec::new();

    for entry in WalkDir::new(&api_dir) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| api_dir.clone());
            MergeError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(SWAGGER_SUFFIX) {
            results.push(entry.into_path());
        }
    }

    Ok(results)
}

/// Discover documents under every root and return the sorted union.
pub fn discover_documents(
    roots: impl IntoIterator<Item = impl AsRef<Path>>,
) -> Result<SortedDocumentPaths> {
    let mut all = Vec::new();
    for root in roots {
        all.extend(find_swagger_files(root.as_ref())?);
    }
    debug!(documents = all.len(), "discovery complete");
    Ok(SortedDocumentPaths::from_unsorted(all))
}
