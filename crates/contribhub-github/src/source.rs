use crate::GitHubClient;
use async_trait::async_trait;
use contribhub_core::{
    ActivitySource, ContributorRef, FetchError, Repository, SearchItem, SearchKind, UserProfile,
};

#[async_trait]
impl ActivitySource for GitHubClient {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, FetchError> {
        Ok(self.list_org_repositories(org).await?)
    }

    async fn list_contributors(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorRef>, FetchError> {
        Ok(self.list_repo_contributors(org, repo).await?)
    }

    async fn fetch_user_profile(&self, login: &str) -> Result<UserProfile, FetchError> {
        Ok(self.get_user_profile(login).await?)
    }

    async fn search_user_issues(
        &self,
        login: &str,
        org: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        Ok(self.search_authored(login, org, SearchKind::Issue).await?)
    }

    async fn search_user_pull_requests(
        &self,
        login: &str,
        org: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        Ok(self.search_authored(login, org, SearchKind::PullRequest).await?)
    }
}
