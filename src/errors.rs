// ABOUTME: Error types for the markdown-to-presentation application
// ABOUTME: Provides structured error handling for the build and publish pipelines

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MtpError {
    #[error("File operation failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required input: {0}")]
    MissingInput(PathBuf),

    #[error("Input validation error: {0}")]
    InputError(String),

    #[error("Markdown rendering error: {0}")]
    RenderError(String),

    #[error("Stylesheet compilation error: {0}")]
    StyleError(String),

    #[error("Internal consistency error: {0}")]
    InternalError(String),

    #[error("Credential environment variable not set: {0}")]
    MissingCredential(String),

    #[error("Publish authentication rejected by remote: {0}")]
    PublishAuthError(String),

    #[error("Publish rejected, remote branch has advanced: {0}")]
    PublishConflictError(String),

    #[error("Publish network failure: {0}")]
    PublishNetworkError(String),

    #[error("{command} failed: {stderr}")]
    GitError { command: String, stderr: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, MtpError>;
