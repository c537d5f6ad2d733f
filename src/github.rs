//! GitHub API Client
//!
//! Label store gateway backed by the GitHub REST API

use std::fmt;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::label::Label;

/// Encode a string for use in URL path segments (RFC 3986 with UTF-8 support)
///
/// This function properly encodes UTF-8 characters including Japanese text.
/// Only unreserved characters (A-Z, a-z, 0-9, -, ., _, ~) are left unencoded.
///
/// # Arguments
/// - `input`: The string to encode
///
/// # Returns
/// URL-encoded string safe for use in path segments
fn encode_path_segment(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            // RFC 3986 unreserved characters
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~' => c.to_string(),
            // Everything else gets percent-encoded as UTF-8 bytes
            _ => c
                .to_string()
                .bytes()
                .map(|b| format!("%{:02X}", b))
                .collect::<String>(),
        })
        .collect()
}

/// Identifies one repository on the label store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RepoId {
    /// Owning user or organization
    pub owner: String,

    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a new repository identifier
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Kind of account that owns repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Organization,
}

/// Remote label store operations needed by the reconciliation core
///
/// The orchestrator only talks to this trait, so tests can substitute an
/// in-memory store and the core stays free of network concerns.
#[async_trait]
pub trait LabelStore: Send + Sync {
    /// List all labels on a repository
    async fn list_labels(&self, repo: &RepoId) -> Result<Vec<Label>>;

    /// List all repositories owned by a user or organization
    async fn list_repositories(&self, owner: &str, kind: OwnerKind) -> Result<Vec<RepoId>>;

    /// Create a label on a repository
    async fn create_label(&self, repo: &RepoId, label: &Label) -> Result<()>;

    /// Replace the label currently named `current_name` with `label`
    async fn update_label(&self, repo: &RepoId, current_name: &str, label: &Label) -> Result<()>;

    /// Delete a label from a repository
    async fn delete_label(&self, repo: &RepoId, name: &str) -> Result<()>;
}

/// GitHub API Client
///
/// Client responsible for interactions with the GitHub API
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// # Arguments
    /// - `access_token`: GitHub access token
    ///
    /// # Errors
    /// Returns an error if client initialization or the authentication
    /// check fails
    pub async fn new(access_token: &str) -> Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(access_token.to_string())
            .build()
            .map_err(Error::GitHubApi)?;

        // Authentication test
        let _user = octocrab
            .current()
            .user()
            .await
            .map_err(|_| Error::AuthenticationFailed)?;

        Ok(Self { octocrab })
    }

    /// Get rate limit information
    ///
    /// # Returns
    /// Rate limit status
    pub async fn rate_limit(&self) -> Result<RateLimitInfo> {
        let rate_limit = self
            .octocrab
            .ratelimit()
            .get()
            .await
            .map_err(Error::GitHubApi)?;

        Ok(RateLimitInfo {
            limit: rate_limit.resources.core.limit as u32,
            remaining: rate_limit.resources.core.remaining as u32,
            reset_at: chrono::DateTime::from_timestamp(rate_limit.resources.core.reset as i64, 0)
                .unwrap_or_else(chrono::Utc::now),
        })
    }
}

/// Classify an octocrab error for one repository
///
/// 404 means the repository (or label) does not exist; rate-limit responses
/// get their own variant so callers can tell them apart from transport
/// failures.
fn map_api_error(err: octocrab::Error, repo: &RepoId) -> Error {
    if let octocrab::Error::GitHub { source, .. } = &err {
        let status = source.status_code.as_u16();
        if status == 404 {
            return Error::RepositoryNotFound(repo.to_string());
        }
        if status == 429 || (status == 403 && source.message.to_lowercase().contains("rate limit"))
        {
            return Error::RateLimited;
        }
    }

    Error::GitHubApi(err)
}

#[async_trait]
impl LabelStore for GitHubClient {
    /// Get all labels from a repository, paginating at 100 per page
    async fn list_labels(&self, repo: &RepoId) -> Result<Vec<Label>> {
        let mut labels = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .octocrab
                .issues(&repo.owner, &repo.name)
                .list_labels_for_repo()
                .page(page)
                .per_page(100)
                .send()
                .await
                .map_err(|e| map_api_error(e, repo))?;

            if response.items.is_empty() {
                break;
            }

            let count = response.items.len();

            for label in response.items {
                labels.push(Label {
                    name: label.name,
                    color: label.color,
                    description: label.description,
                });
            }

            // A short page is the last one
            if count < 100 {
                break;
            }

            page += 1;
        }

        Ok(labels)
    }

    /// List all repositories for a user or organization with pagination
    async fn list_repositories(&self, owner: &str, kind: OwnerKind) -> Result<Vec<RepoId>> {
        let probe = RepoId::new(owner, "*");
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let items: Vec<octocrab::models::Repository> = match kind {
                OwnerKind::Organization => self
                    .octocrab
                    .orgs(owner)
                    .list_repos()
                    .per_page(100)
                    .page(page)
                    .send()
                    .await
                    .map_err(|e| map_api_error(e, &probe))?
                    .items,
                OwnerKind::User => {
                    let route = format!(
                        "/users/{}/repos?per_page=100&page={}",
                        encode_path_segment(owner),
                        page
                    );
                    self.octocrab
                        .get(&route, None::<&()>)
                        .await
                        .map_err(|e| map_api_error(e, &probe))?
                }
            };

            let count = items.len();
            repos.extend(items.into_iter().map(|r| RepoId::new(owner, r.name)));

            if count < 100 {
                break;
            }

            page += 1;
        }

        Ok(repos)
    }

    async fn create_label(&self, repo: &RepoId, label: &Label) -> Result<()> {
        self.octocrab
            .issues(&repo.owner, &repo.name)
            .create_label(
                &label.name,
                &label.color,
                label.description.as_deref().unwrap_or(""),
            )
            .await
            .map_err(|e| map_api_error(e, repo))?;

        Ok(())
    }

    /// Replace a label
    ///
    /// octocrab 0.38 has no direct label update method, so the current label
    /// is deleted and recreated with the desired state.
    async fn update_label(&self, repo: &RepoId, current_name: &str, label: &Label) -> Result<()> {
        self.delete_label(repo, current_name).await?;
        self.create_label(repo, label).await
    }

    async fn delete_label(&self, repo: &RepoId, name: &str) -> Result<()> {
        // Label names may contain spaces, special characters, and UTF-8
        let encoded_name = encode_path_segment(name);
        self.octocrab
            .issues(&repo.owner, &repo.name)
            .delete_label(&encoded_name)
            .await
            .map_err(|e| map_api_error(e, repo))?;

        Ok(())
    }
}

/// Rate Limit Information
///
/// Represents GitHub API rate limit status
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Hourly limit
    pub limit: u32,

    /// Remaining usage count
    pub remaining: u32,

    /// Reset time
    pub reset_at: chrono::DateTime<chrono::Utc>,
}
