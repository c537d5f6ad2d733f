//! Configuration Management
//!
//! Run configuration and target selection

use serde::Serialize;

use crate::error::{Error, Result};

/// Default width of the per-repository worker pool
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Selects which repositories a run reconciles
///
/// Collapses the four user/org x with/without-repo combinations into one
/// tagged type so the resolver and orchestrator share a single control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RepoSelector {
    /// Every repository owned by a user
    User { owner: String },

    /// A single repository owned by a user
    UserRepo { owner: String, repo: String },

    /// Every repository owned by an organization
    Org { owner: String },

    /// A single repository owned by an organization
    OrgRepo { owner: String, repo: String },
}

impl RepoSelector {
    /// Build a selector from CLI flag values
    ///
    /// # Arguments
    /// - `user`: Value of the --user flag
    /// - `org`: Value of the --org flag
    /// - `repo`: Value of the --repo flag
    ///
    /// # Errors
    /// Returns a configuration error unless exactly one of user/org is set
    pub fn from_flags(
        user: Option<String>,
        org: Option<String>,
        repo: Option<String>,
    ) -> Result<Self> {
        match (user, org) {
            (Some(owner), None) => Ok(match repo {
                Some(repo) => RepoSelector::UserRepo { owner, repo },
                None => RepoSelector::User { owner },
            }),
            (None, Some(owner)) => Ok(match repo {
                Some(repo) => RepoSelector::OrgRepo { owner, repo },
                None => RepoSelector::Org { owner },
            }),
            (Some(_), Some(_)) => Err(Error::config_validation(
                "Specify either a user or an organization, not both",
            )),
            (None, None) => Err(Error::config_validation(
                "You must specify either an organization or user",
            )),
        }
    }

    /// The owning user or organization
    pub fn owner(&self) -> &str {
        match self {
            RepoSelector::User { owner }
            | RepoSelector::UserRepo { owner, .. }
            | RepoSelector::Org { owner }
            | RepoSelector::OrgRepo { owner, .. } => owner,
        }
    }

    /// The single repository name, when scoped to one
    pub fn repo(&self) -> Option<&str> {
        match self {
            RepoSelector::UserRepo { repo, .. } | RepoSelector::OrgRepo { repo, .. } => {
                Some(repo)
            }
            RepoSelector::User { .. } | RepoSelector::Org { .. } => None,
        }
    }

    /// Whether the owner is an organization
    pub fn is_org(&self) -> bool {
        matches!(self, RepoSelector::Org { .. } | RepoSelector::OrgRepo { .. })
    }
}

/// Sync Configuration
///
/// ghlabel execution configuration
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// GitHub access token
    pub access_token: String,

    /// Reference repository whose labels are canonical (owner/repo format)
    pub reference: String,

    /// Repositories to reconcile
    pub selector: RepoSelector,

    /// Execute the plan instead of reporting it
    pub apply: bool,

    /// Maximum number of repositories reconciled concurrently
    pub concurrency: usize,
}

impl SyncConfig {
    /// Validate configuration
    ///
    /// # Errors
    /// - If the access token is empty
    /// - If the reference repository format is invalid
    /// - If the concurrency is zero
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::config_validation("Access token is required"));
        }

        parse_repository(&self.reference)?;

        if self.concurrency == 0 {
            return Err(Error::config_validation("Concurrency must be at least 1"));
        }

        Ok(())
    }

    /// Get the reference repository owner and name
    pub fn parse_reference(&self) -> Result<(String, String)> {
        parse_repository(&self.reference)
    }
}

/// Parse a repository string into owner and name
///
/// # Arguments
/// - `repo`: Repository string in "owner/repo" format
///
/// # Errors
/// Returns an error if the format is invalid
pub fn parse_repository(repo: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Error::InvalidRepositoryFormat(repo.to_string()));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(selector: RepoSelector) -> SyncConfig {
        SyncConfig {
            access_token: "token".to_string(),
            reference: "owner/labels".to_string(),
            selector,
            apply: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    #[test]
    fn test_parse_repository() {
        assert!(parse_repository("owner/repo").is_ok());
        assert!(parse_repository("org/project").is_ok());

        assert!(parse_repository("repo").is_err()); // No slash
        assert!(parse_repository("/repo").is_err()); // No owner
        assert!(parse_repository("owner/").is_err()); // No repo name
        assert!(parse_repository("owner/repo/sub").is_err()); // Too many parts
    }

    #[test]
    fn test_selector_from_flags_user() {
        let selector = RepoSelector::from_flags(Some("alice".into()), None, None).unwrap();
        assert_eq!(selector, RepoSelector::User { owner: "alice".into() });
        assert_eq!(selector.owner(), "alice");
        assert_eq!(selector.repo(), None);
        assert!(!selector.is_org());
    }

    #[test]
    fn test_selector_from_flags_user_repo() {
        let selector =
            RepoSelector::from_flags(Some("alice".into()), None, Some("tools".into())).unwrap();
        assert_eq!(
            selector,
            RepoSelector::UserRepo { owner: "alice".into(), repo: "tools".into() }
        );
        assert_eq!(selector.repo(), Some("tools"));
    }

    #[test]
    fn test_selector_from_flags_org() {
        let selector = RepoSelector::from_flags(None, Some("acme".into()), None).unwrap();
        assert_eq!(selector, RepoSelector::Org { owner: "acme".into() });
        assert!(selector.is_org());
    }

    #[test]
    fn test_selector_from_flags_org_repo() {
        let selector =
            RepoSelector::from_flags(None, Some("acme".into()), Some("widgets".into())).unwrap();
        assert_eq!(
            selector,
            RepoSelector::OrgRepo { owner: "acme".into(), repo: "widgets".into() }
        );
    }

    #[test]
    fn test_selector_rejects_both_owners() {
        let result = RepoSelector::from_flags(Some("alice".into()), Some("acme".into()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_selector_rejects_no_owner() {
        let result = RepoSelector::from_flags(None, None, Some("tools".into()));
        assert!(result.is_err());
    }

    #[test]
    fn test_sync_config_valid() {
        let config = config(RepoSelector::User { owner: "alice".into() });
        assert!(config.validate().is_ok());

        let (owner, repo) = config.parse_reference().unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "labels");
    }

    #[test]
    fn test_sync_config_empty_token_error() {
        let mut config = config(RepoSelector::User { owner: "alice".into() });
        config.access_token = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sync_config_invalid_reference_error() {
        let mut config = config(RepoSelector::User { owner: "alice".into() });
        config.reference = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sync_config_zero_concurrency_error() {
        let mut config = config(RepoSelector::User { owner: "alice".into() });
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }
}
