// ABOUTME: Stylesheet compilation for the markdown-to-presentation application
// ABOUTME: Merges the theme and app scss sources and compiles them to CSS

use crate::errors::{MtpError, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Concatenate the base theme source and the app override source, theme
/// first so the cascade order is deterministic, then compile to compressed
/// CSS. Either source missing is fatal.
pub fn compile_stylesheet(theme_path: &Path, app_path: &Path) -> Result<String> {
    info!(
        "Compiling stylesheet from {:?} and {:?}",
        theme_path, app_path
    );

    if !theme_path.is_file() {
        return Err(MtpError::MissingInput(theme_path.to_path_buf()));
    }
    if !app_path.is_file() {
        return Err(MtpError::MissingInput(app_path.to_path_buf()));
    }

    let mut source = fs::read_to_string(theme_path)?;
    source.push('\n');
    source.push_str(&fs::read_to_string(app_path)?);

    let options = grass::Options::default().style(grass::OutputStyle::Compressed);
    grass::from_string(source, &options).map_err(|e| MtpError::StyleError(e.to_string()))
}
