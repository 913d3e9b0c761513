//! Directory scanner for discovering 2DA files

use std::path::{Path, PathBuf};
use tracing::warn;
use twoda_core::{load_file, Version};
use walkdir::WalkDir;

/// Shape of a table that loaded successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub version: Version,
    pub rows: usize,
    pub columns: usize,
}

/// One 2DA file found under a scan root
#[derive(Debug)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub outcome: twoda_core::Result<TableSummary>,
}

/// Find every `.2da` file under `roots` and try to load it.
/// Entries come back sorted by path.
pub fn scan_roots<P: AsRef<Path>>(roots: &[P]) -> Vec<ScanEntry> {
    let mut entries = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root.as_ref()).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_2da(path) {
                continue;
            }

            let outcome = load_file(path).map(|table| TableSummary {
                version: table.version(),
                rows: table.row_count(),
                columns: table.column_count(),
            });

            entries.push(ScanEntry {
                path: path.to_path_buf(),
                outcome,
            });
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Check for a `.2da` extension, ignoring case
fn is_2da(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("2da"))
}
