//! Repository Resolver
//!
//! Expands a target selector into concrete repository identifiers

use crate::config::RepoSelector;
use crate::error::Result;
use crate::github::{LabelStore, OwnerKind, RepoId};

/// Resolve a selector to the list of repositories it covers
///
/// Single-repository selectors resolve without touching the gateway; whether
/// the repository actually exists surfaces later, when its labels are
/// fetched. Owner-wide selectors enumerate through the gateway's repository
/// listing (pagination happens inside the gateway).
///
/// The returned list is sorted so downstream processing and reports are
/// reproducible.
///
/// # Errors
/// Returns an error if the gateway listing fails
pub async fn resolve_targets<S: LabelStore + ?Sized>(
    store: &S,
    selector: &RepoSelector,
) -> Result<Vec<RepoId>> {
    let mut targets = match selector {
        RepoSelector::UserRepo { owner, repo } | RepoSelector::OrgRepo { owner, repo } => {
            vec![RepoId::new(owner.clone(), repo.clone())]
        }
        RepoSelector::User { owner } => store.list_repositories(owner, OwnerKind::User).await?,
        RepoSelector::Org { owner } => {
            store
                .list_repositories(owner, OwnerKind::Organization)
                .await?
        }
    };

    targets.sort();
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::label::Label;
    use async_trait::async_trait;

    /// Listing-only store: label operations are never reached here
    struct ListingStore {
        repos: Vec<RepoId>,
        expect_kind: OwnerKind,
    }

    #[async_trait]
    impl LabelStore for ListingStore {
        async fn list_labels(&self, repo: &RepoId) -> crate::error::Result<Vec<Label>> {
            Err(Error::RepositoryNotFound(repo.to_string()))
        }

        async fn list_repositories(
            &self,
            owner: &str,
            kind: OwnerKind,
        ) -> crate::error::Result<Vec<RepoId>> {
            assert_eq!(kind, self.expect_kind);
            assert!(!owner.is_empty());
            Ok(self.repos.clone())
        }

        async fn create_label(&self, _: &RepoId, _: &Label) -> crate::error::Result<()> {
            unreachable!("resolver never mutates")
        }

        async fn update_label(&self, _: &RepoId, _: &str, _: &Label) -> crate::error::Result<()> {
            unreachable!("resolver never mutates")
        }

        async fn delete_label(&self, _: &RepoId, _: &str) -> crate::error::Result<()> {
            unreachable!("resolver never mutates")
        }
    }

    #[tokio::test]
    async fn test_single_repo_selectors_skip_the_gateway() {
        let store = ListingStore {
            repos: vec![],
            expect_kind: OwnerKind::User,
        };

        let selector = RepoSelector::UserRepo {
            owner: "alice".into(),
            repo: "tools".into(),
        };
        let targets = resolve_targets(&store, &selector).await.unwrap();
        assert_eq!(targets, vec![RepoId::new("alice", "tools")]);

        let selector = RepoSelector::OrgRepo {
            owner: "acme".into(),
            repo: "widgets".into(),
        };
        let targets = resolve_targets(&store, &selector).await.unwrap();
        assert_eq!(targets, vec![RepoId::new("acme", "widgets")]);
    }

    #[tokio::test]
    async fn test_user_selector_lists_user_repositories() {
        let store = ListingStore {
            repos: vec![RepoId::new("alice", "tools"), RepoId::new("alice", "blog")],
            expect_kind: OwnerKind::User,
        };

        let selector = RepoSelector::User { owner: "alice".into() };
        let targets = resolve_targets(&store, &selector).await.unwrap();

        // Sorted regardless of gateway order
        assert_eq!(
            targets,
            vec![RepoId::new("alice", "blog"), RepoId::new("alice", "tools")]
        );
    }

    #[tokio::test]
    async fn test_org_selector_lists_org_repositories() {
        let store = ListingStore {
            repos: vec![RepoId::new("acme", "widgets")],
            expect_kind: OwnerKind::Organization,
        };

        let selector = RepoSelector::Org { owner: "acme".into() };
        let targets = resolve_targets(&store, &selector).await.unwrap();

        assert_eq!(targets, vec![RepoId::new("acme", "widgets")]);
    }
}
