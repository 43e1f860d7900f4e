use crate::{GitHubClient, Result};
use contribhub_core::{ContributorRef, Repository, SearchItem, SearchKind, UserProfile};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

/// Search query for items of `kind` authored by `login` inside `org`
pub fn search_query(login: &str, org: &str, kind: SearchKind) -> String {
    format!("author:{} org:{} type:{}", login, org, kind.qualifier())
}

fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    if body.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(body)?)
}

impl GitHubClient {
    /// List the repositories of an organization
    pub async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let body = self.get_json(&format!("/orgs/{}/repos", org), &[]).await?;
        decode_list(body)
    }

    /// List the contributors of a repository.
    ///
    /// GitHub answers `204 No Content` for empty repositories, which yields
    /// an empty list.
    pub async fn list_repo_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<ContributorRef>> {
        let body = self
            .get_json(&format!("/repos/{}/{}/contributors", owner, repo), &[])
            .await?;
        decode_list(body)
    }

    pub async fn get_user_profile(&self, login: &str) -> Result<UserProfile> {
        let body = self.get_json(&format!("/users/{}", login), &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Issues or pull requests authored by `login` across `org`
    pub async fn search_authored(
        &self,
        login: &str,
        org: &str,
        kind: SearchKind,
    ) -> Result<Vec<SearchItem>> {
        let query = search_query(login, org, kind);
        let body = self
            .get_json("/search/issues", &[("q", query.as_str())])
            .await?;

        if body.is_null() {
            return Ok(Vec::new());
        }

        let page: SearchPage = serde_json::from_value(body)?;
        let items = page.items.unwrap_or_default();
        tracing::debug!(
            "Search '{}' matched {} items ({} returned)",
            query,
            page.total_count,
            items.len()
        );

        Ok(items)
    }
}
