use crate::error::FetchError;
use crate::models::{ContributorRef, Repository, SearchItem, UserProfile};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Issue,
    PullRequest,
}

impl SearchKind {
    /// Value of the `type:` qualifier in a search query
    pub fn qualifier(&self) -> &'static str {
        match self {
            SearchKind::Issue => "issue",
            SearchKind::PullRequest => "pr",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::Issue => write!(f, "issues"),
            SearchKind::PullRequest => write!(f, "pull requests"),
        }
    }
}

/// Remote queries the aggregation engine is built on.
///
/// Implementations perform one request per call and keep no state between
/// calls. Every failure is reported as a [`FetchError`]; the caller decides
/// whether it is fatal.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// List the repositories of an organization
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, FetchError>;

    /// List the contributors of one repository
    async fn list_contributors(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorRef>, FetchError>;

    /// Fetch a user's profile summary
    async fn fetch_user_profile(&self, login: &str) -> Result<UserProfile, FetchError>;

    /// Issues authored by `login` anywhere in `org`
    async fn search_user_issues(
        &self,
        login: &str,
        org: &str,
    ) -> Result<Vec<SearchItem>, FetchError>;

    /// Pull requests authored by `login` anywhere in `org`
    async fn search_user_pull_requests(
        &self,
        login: &str,
        org: &str,
    ) -> Result<Vec<SearchItem>, FetchError>;
}
