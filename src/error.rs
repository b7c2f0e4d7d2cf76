use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for nextver operations
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Repository not found: {0}")]
    RepositoryNotFound(PathBuf),

    #[error("Cannot open repository at {path}: {source}")]
    RepositoryOpen {
        path: PathBuf,
        source: git2::Error,
    },

    #[error("Clone of '{url}' failed: {source}")]
    Clone { url: String, source: git2::Error },

    #[error("Unsupported authentication method: {0}")]
    UnsupportedAuth(String),

    #[error("Invalid version '{text}': {source}")]
    InvalidVersion { text: String, source: semver::Error },

    #[error("Invalid prerelease '{text}': {source}")]
    InvalidPrerelease { text: String, source: semver::Error },

    #[error("Branch '{0}' not found")]
    BranchNotFound(String),

    #[error("Checkout failed: {0}")]
    Checkout(git2::Error),

    #[error("Cannot create tag '{name}': {source}")]
    TagCreation { name: String, source: git2::Error },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in nextver
pub type Result<T> = std::result::Result<T, NextverError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextverError::Config(msg.into())
    }

    /// Create an unsupported-auth error with context
    pub fn unsupported_auth(msg: impl Into<String>) -> Self {
        NextverError::UnsupportedAuth(msg.into())
    }
}
