use async_trait::async_trait;
use contribhub_core::{
    ActivitySource, AggregateRecord, AggregationEngine, ContributorRef, EngineConfig, Error,
    FetchError, Repository, SearchItem, UserProfile,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// In-memory organization. Repositories without an entry in `contributors`
/// fail their contributor listing.
#[derive(Default)]
struct Organization {
    repositories: Option<Vec<String>>,
    contributors: HashMap<String, Vec<ContributorRef>>,
    search_delay: HashMap<String, Duration>,
}

impl Organization {
    fn new(repositories: &[&str]) -> Self {
        Self {
            repositories: Some(repositories.iter().map(|r| r.to_string()).collect()),
            ..Default::default()
        }
    }

    fn contributors(mut self, repo: &str, rows: Vec<(&str, u64)>) -> Self {
        self.contributors.insert(
            repo.to_string(),
            rows.into_iter()
                .map(|(login, count)| ContributorRef::new(login, count))
                .collect(),
        );
        self
    }
}

fn unavailable() -> FetchError {
    FetchError::Status {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

#[async_trait]
impl ActivitySource for Organization {
    async fn list_repositories(&self, _org: &str) -> Result<Vec<Repository>, FetchError> {
        self.repositories
            .as_ref()
            .map(|names| names.iter().map(Repository::new).collect())
            .ok_or_else(unavailable)
    }

    async fn list_contributors(
        &self,
        _org: &str,
        repo: &str,
    ) -> Result<Vec<ContributorRef>, FetchError> {
        self.contributors.get(repo).cloned().ok_or_else(unavailable)
    }

    async fn fetch_user_profile(&self, login: &str) -> Result<UserProfile, FetchError> {
        Ok(UserProfile {
            login: login.to_string(),
            followers: login.len() as u64,
            following: 0,
            avatar_url: format!("https://avatars.example.com/{}", login),
        })
    }

    async fn search_user_issues(
        &self,
        login: &str,
        org: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        if let Some(delay) = self.search_delay.get(login) {
            tokio::time::sleep(*delay).await;
        }
        Ok(vec![json!({"author": login, "org": org, "kind": "issue"})])
    }

    async fn search_user_pull_requests(
        &self,
        _login: &str,
        _org: &str,
    ) -> Result<Vec<SearchItem>, FetchError> {
        Ok(vec![])
    }
}

async fn aggregate(org: Organization) -> contribhub_core::Result<Vec<AggregateRecord>> {
    AggregationEngine::new(Arc::new(org), EngineConfig::new("c2siorg"))
        .aggregate("c2siorg")
        .await
}

fn repo_set(record: &AggregateRecord) -> HashSet<&str> {
    record.repos.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn test_shared_contributor_scenario() {
    let org = Organization::new(&["R1", "R2"])
        .contributors("R1", vec![("alice", 5)])
        .contributors("R2", vec![("alice", 2), ("bob", 1)]);

    let records = aggregate(org).await.unwrap();

    assert_eq!(records.len(), 2);
    let alice = records.iter().find(|r| r.login == "alice").unwrap();
    assert!([5, 2].contains(&alice.contributions));
    assert_eq!(repo_set(alice), HashSet::from(["R1", "R2"]));

    let bob = records.iter().find(|r| r.login == "bob").unwrap();
    assert_eq!(bob.contributions, 1);
    assert_eq!(bob.repos, vec!["R2"]);
}

#[tokio::test]
async fn test_repository_listing_failure_yields_no_partial_result() {
    let org = Organization::default();

    match aggregate(org).await {
        Err(Error::RepositoriesUnavailable(FetchError::Status { status, .. })) => {
            assert_eq!(status, 503)
        }
        other => panic!("expected terminal failure, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_isolation_between_repositories() {
    let org = Organization::new(&["A", "B"]).contributors("A", vec![("alice", 3), ("carol", 8)]);

    let records = aggregate(org).await.unwrap();

    let logins: HashSet<&str> = records.iter().map(|r| r.login.as_str()).collect();
    assert_eq!(logins, HashSet::from(["alice", "carol"]));
    for record in &records {
        assert_eq!(record.repos, vec!["A"]);
        assert_eq!(record.issues.len(), 1);
    }
}

#[tokio::test]
async fn test_no_lost_updates_when_branches_race_on_one_login() {
    let repositories: Vec<String> = (0..25).map(|i| format!("repo-{:02}", i)).collect();
    let names: Vec<&str> = repositories.iter().map(String::as_str).collect();

    let mut org = Organization::new(&names);
    for name in &names {
        org = org.contributors(name, vec![("alice", 1), ("bob", 2)]);
    }
    org.search_delay
        .insert("alice".to_string(), Duration::from_millis(3));

    let records = aggregate(org).await.unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.repos.len(), 25);
        assert_eq!(repo_set(record).len(), 25);
    }
}

#[tokio::test]
async fn test_search_results_are_scoped_to_the_organization() {
    let org = Organization::new(&["R1"]).contributors("R1", vec![("dave", 1)]);

    let records = aggregate(org).await.unwrap();

    assert_eq!(records[0].issues[0]["org"], "c2siorg");
    assert_eq!(records[0].issues[0]["author"], "dave");
    assert!(records[0].pull_requests.is_empty());
}

#[tokio::test]
async fn test_repository_without_contributors() {
    let org = Organization::new(&["empty", "R1"])
        .contributors("empty", vec![])
        .contributors("R1", vec![("erin", 4)]);

    let records = aggregate(org).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].login, "erin");
    assert_eq!(records[0].followers, 4);
}
