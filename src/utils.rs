// ABOUTME: Utility functions for the markdown-to-presentation application
// ABOUTME: Path validation and recursive directory copy helpers

use crate::errors::{MtpError, Result};
use std::fs;
use std::path::Path;

/// Validate that a file exists
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(MtpError::MissingInput(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(MtpError::InputError(format!(
            "Path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}

/// Validate that a directory exists
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(MtpError::MissingInput(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(MtpError::InputError(format!(
            "Path is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Copy a directory tree, preserving relative layout.
pub fn copy_dir_all(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
