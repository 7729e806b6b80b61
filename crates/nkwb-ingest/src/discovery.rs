//! Export file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all `.xls` files in a directory.
///
/// Returns files sorted by filename.
pub fn list_export_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && is_export_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// `.xls` extension, case-insensitive. Lock files Excel leaves next to an
/// open workbook (`~$name.xls`) are not exports.
pub fn is_export_file(path: &Path) -> bool {
    let is_xls = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xls"));
    let is_lock = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("~$"));
    is_xls && !is_lock
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_xls_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.XLS", "a.xls", "notes.txt", "~$a.xls", "c.xlsx"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.xls")).unwrap();

        let names: Vec<String> = list_export_files(dir.path())
            .unwrap()
            .iter()
            .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["a.xls", "b.XLS"]);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_export_files(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
