// ABOUTME: Library module for the markdown-to-presentation program.
// ABOUTME: Contains core functionality for building and publishing HTML slide decks.

// Reexport modules
pub mod assemble;
pub mod assets;
pub mod build;
pub mod config;
pub mod errors;
pub mod publish;
pub mod rawhtml;
pub mod render;
pub mod split;
pub mod theme;
pub mod utils;

// Reexport common types and functions
pub use assemble::assemble;
pub use assets::bundle_assets;
pub use build::run_build;
pub use config::{BuildConfig, PublishConfig};
pub use errors::{MtpError, Result};
pub use publish::{publish, Workspace};
pub use rawhtml::{extract_raw_html, reinsert_raw_html, ExtractedSlide, RawHtmlBlock};
pub use render::render_markdown;
pub use split::split_slides;
pub use theme::compile_stylesheet;
