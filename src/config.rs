// ABOUTME: Configuration module for the markdown-to-presentation application
// ABOUTME: Explicit path and publish settings, with environment overrides

use std::env;
use std::path::PathBuf;

/// File name of the base theme stylesheet source inside the asset directory.
pub const THEME_SCSS: &str = "_theme.scss";
/// File name of the app override stylesheet source inside the asset directory.
pub const APP_SCSS: &str = "_app.scss";

/// Scratch directory the tool owns inside the project.
pub const MTP_DIR: &str = ".mtp";

/// Everything the build pipeline reads and writes, named explicitly rather
/// than resolved from the working directory inside the pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub slides_path: PathBuf,
    pub assets_dir: PathBuf,
    pub build_dir: PathBuf,
    pub redirect_path: PathBuf,
    pub asset_pattern: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            slides_path: PathBuf::from("slides.md"),
            assets_dir: PathBuf::from("assets"),
            build_dir: PathBuf::from("build"),
            redirect_path: PathBuf::from("index.htm"),
            asset_pattern: "*".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn theme_scss_path(&self) -> PathBuf {
        self.assets_dir.join(THEME_SCSS)
    }

    pub fn app_scss_path(&self) -> PathBuf {
        self.assets_dir.join(APP_SCSS)
    }
}

/// Settings for the publish synchronizer. The remote URL is normally
/// discovered from the enclosing repository's remote; tests and unusual
/// setups can override it directly.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub remote: String,
    pub branch: String,
    pub token_var: String,
    pub workspace_dir: PathBuf,
    pub repo_dir: PathBuf,
    pub remote_url: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "gh-pages".to_string(),
            token_var: "GH_TOKEN".to_string(),
            workspace_dir: PathBuf::from(MTP_DIR).join("pages"),
            repo_dir: PathBuf::from("."),
            remote_url: None,
        }
    }
}

impl PublishConfig {
    /// Load publish settings, letting the environment override defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            remote: env::var("MTP_REMOTE").unwrap_or(defaults.remote),
            branch: env::var("MTP_PAGES_BRANCH").unwrap_or(defaults.branch),
            token_var: env::var("MTP_TOKEN_VAR").unwrap_or(defaults.token_var),
            workspace_dir: env::var("MTP_WORKSPACE")
                .map(PathBuf::from)
                .unwrap_or(defaults.workspace_dir),
            repo_dir: defaults.repo_dir,
            remote_url: None,
        }
    }
}
