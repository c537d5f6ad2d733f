//! Error Handling
//!
//! Error type definitions used in ghlabel

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ghlabel
#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(#[from] octocrab::Error),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("Duplicate label '{name}' in {repository}")]
    DuplicateLabel { name: String, repository: String },

    #[error("Failed to fetch reference labels from {repository}: {source}")]
    ReferenceFetch {
        repository: String,
        source: Box<Error>,
    },

    #[error("Authentication failed: invalid token")]
    AuthenticationFailed,

    #[error("Configuration validation error: {0}")]
    ConfigValidation(String),

    #[error("Label validation error: {0}")]
    LabelValidation(String),

    #[error("Invalid repository format: {0} (expected 'owner/repo')")]
    InvalidRepositoryFormat(String),

    #[error("Invalid label color: {0} (expected 6-digit hex)")]
    InvalidLabelColor(String),
}

impl Error {
    /// Create a new configuration validation error
    pub fn config_validation<S: Into<String>>(message: S) -> Self {
        Error::ConfigValidation(message.into())
    }

    /// Create a new label validation error
    pub fn label_validation<S: Into<String>>(message: S) -> Self {
        Error::LabelValidation(message.into())
    }

    /// Wrap an error as a fatal reference fetch failure
    pub fn reference_fetch<S: Into<String>>(repository: S, source: Error) -> Self {
        Error::ReferenceFetch {
            repository: repository.into(),
            source: Box::new(source),
        }
    }
}
