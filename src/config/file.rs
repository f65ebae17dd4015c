//
//  trello-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level helpers used by [`Config`](super::Config) to read and write the
//! TOML file. Writes go through a sibling temporary file and a rename, so a
//! crash mid-write never leaves a truncated configuration behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Reads the whole configuration file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid UTF-8; the error names
/// the path.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Replaces the configuration file with `content`.
///
/// Parent directories are created as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let staging = staging_path(path);
    std::fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    std::fs::rename(&staging, path)
        .with_context(|| format!("Failed to replace config file {}", path.display()))?;
    Ok(())
}

/// Returns `true` if a configuration file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "config.toml".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");

        write_config_file(&path, "first").unwrap();
        write_config_file(&path, "second").unwrap();

        assert_eq!(read_config_file(&path).unwrap(), "second");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_config_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        assert!(!config_exists(&path));
        assert!(!config_exists(dir.path()));

        write_config_file(&path, "").unwrap();
        assert!(config_exists(&path));
    }

    #[test]
    fn test_read_error_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
