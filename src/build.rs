// ABOUTME: Build orchestrator for the markdown-to-presentation application
// ABOUTME: Runs the linear pipeline from slides markdown to a finished build directory

use crate::assemble::assemble;
use crate::assets::bundle_assets;
use crate::config::BuildConfig;
use crate::errors::{MtpError, Result};
use crate::rawhtml::{extract_raw_html, reinsert_raw_html};
use crate::render::render_markdown;
use crate::split::split_slides;
use crate::theme::compile_stylesheet;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the whole build pipeline: load, split, extract raw html, render,
/// reinsert, assemble, compile the stylesheet, bundle assets, write output.
///
/// Every fallible pure stage runs before any filesystem mutation, and the
/// output is staged into a scratch directory that is swapped into place only
/// once complete. A failed build leaves the previous build directory exactly
/// as it was.
pub fn run_build(config: &BuildConfig) -> Result<()> {
    info!("Building presentation from {:?}", config.slides_path);

    if !config.slides_path.is_file() {
        return Err(MtpError::MissingInput(config.slides_path.to_path_buf()));
    }
    let markdown = fs::read_to_string(&config.slides_path)?;

    let stylesheet = compile_stylesheet(&config.theme_scss_path(), &config.app_scss_path())?;

    let fragments = split_slides(&markdown);
    info!("Split {} slide(s)", fragments.len());

    let mut rendered = Vec::with_capacity(fragments.len());
    for fragment in &fragments {
        let extracted = extract_raw_html(fragment);
        let html = render_markdown(&extracted.markdown);
        rendered.push(reinsert_raw_html(html, &extracted.blocks)?);
    }

    let index = assemble(&rendered);

    // All remaining failures are plain I/O; stage and swap.
    let staging = staging_dir(&config.build_dir);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;
    fs::write(staging.join("index.htm"), &index)?;
    fs::write(staging.join("presentation.css"), &stylesheet)?;
    bundle_assets(&config.assets_dir, &staging, &config.asset_pattern)?;

    if config.build_dir.exists() {
        fs::remove_dir_all(&config.build_dir)?;
    }
    fs::rename(&staging, &config.build_dir)?;

    fs::write(&config.redirect_path, redirect_html(&config.build_dir))?;
    info!("Build complete: {:?}", config.build_dir);
    Ok(())
}

/// The top-level redirect page pointing browsers at the built presentation.
fn redirect_html(build_dir: &Path) -> String {
    let dir_name = build_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "build".to_string());
    format!(
        "\
<!doctype html>
<html>
    <head>
        <meta charset=\"utf-8\">
        <meta http-equiv=\"refresh\" content=\"0; url={0}/index.htm\">
    </head>
    <body>
        <a href=\"{0}/index.htm\">presentation</a>
    </body>
</html>
",
        dir_name
    )
}

fn staging_dir(build_dir: &Path) -> PathBuf {
    let mut name = build_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "build".to_string());
    name.push_str(".staging");
    build_dir.with_file_name(name)
}
