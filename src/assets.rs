// ABOUTME: Asset bundler for the markdown-to-presentation application
// ABOUTME: Copies static assets matching a glob into the build output directory

use crate::config::{APP_SCSS, THEME_SCSS};
use crate::errors::{MtpError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Copy every file in the asset directory matching the pattern into the
/// output root, unchanged. The two stylesheet sources are never copied;
/// they only exist to be compiled. A missing asset directory is not an
/// error, it just means zero copies.
pub fn bundle_assets(assets_dir: &Path, out_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !assets_dir.is_dir() {
        info!("Asset directory {:?} not found, skipping copy", assets_dir);
        return Ok(Vec::new());
    }

    let glob_pattern = format!("{}/{}", assets_dir.to_string_lossy(), pattern);
    let paths = glob::glob(&glob_pattern)
        .map_err(|e| MtpError::InputError(format!("Invalid asset pattern: {}", e)))?;

    let mut copied = Vec::new();
    for entry in paths.flatten() {
        if !entry.is_file() {
            continue;
        }
        let name = match entry.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        if name == THEME_SCSS || name == APP_SCSS {
            continue;
        }

        let dest = out_dir.join(&name);
        fs::copy(&entry, &dest)?;
        copied.push(dest);
    }

    copied.sort();
    info!("Copied {} asset(s) into {:?}", copied.len(), out_dir);
    Ok(copied)
}
