//! # Luxe Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the storage layer and the exporter:
//! - **`ensure_dir_exists`**: creates a directory (and parents) or checks that an existing path is a directory.
//! - **`read_file_if_exists`**: reads a file to a string, mapping "not found" to `None`.
//! - **`write_string_atomic`**: writes through a sibling temp file and renames it into place,
//!   so a reader never observes a half-written storage file.
//!
//! All errors carry context naming the path involved.
//!
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Ensures that a directory exists at the specified path.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(LuxeError::Storage(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Reads the entire content of a file, or `None` when the file does not exist.
pub fn read_file_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read file {:?}", path)),
    }
}

/// Writes `content` to `path`, replacing any existing file in one rename.
///
/// The parent directory is created first if needed.
pub fn write_string_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write to file {:?}", tmp_path))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move {:?} into place at {:?}", tmp_path, path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_missing_file_is_none() -> Result<()> {
        let base_dir = tempdir()?;
        assert_eq!(read_file_if_exists(&base_dir.path().join("nope.json"))?, None);
        Ok(())
    }

    #[test]
    fn test_atomic_write_then_read() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/store.json");

        write_string_atomic(&file_path, "{\"a\":\"1\"}")?;
        write_string_atomic(&file_path, "{\"a\":\"2\"}")?;

        assert_eq!(
            read_file_if_exists(&file_path)?.as_deref(),
            Some("{\"a\":\"2\"}")
        );
        // No temp file is left behind.
        assert!(!file_path.with_extension("tmp").exists());
        Ok(())
    }
}
