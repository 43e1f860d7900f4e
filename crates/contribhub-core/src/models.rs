use serde::{Deserialize, Serialize};

/// Issue or pull request record returned verbatim by the search endpoint.
pub type SearchItem = serde_json::Value;

/// Organization repository. Only `name` is used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: None,
            html_url: None,
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.full_name {
            Some(full_name) => write!(f, "{}", full_name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// One (repository, contributor) row as reported by the contributors listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorRef {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

impl ContributorRef {
    pub fn new(login: impl Into<String>, contributions: u64) -> Self {
        Self {
            login: login.into(),
            contributions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub avatar_url: String,
}

/// Merged view of one contributor's activity across every scanned repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    pub login: String,
    pub contributions: u64,
    pub repos: Vec<String>,
    pub followers: u64,
    pub following: u64,
    pub avatar_url: String,
    pub issues: Vec<SearchItem>,
    #[serde(rename = "pullRequests")]
    pub pull_requests: Vec<SearchItem>,
}

impl AggregateRecord {
    /// Seed a record from the first branch that discovered this login.
    pub fn seed(
        repo_name: &str,
        contributor: &ContributorRef,
        profile: UserProfile,
        issues: Vec<SearchItem>,
        pull_requests: Vec<SearchItem>,
    ) -> Self {
        Self {
            login: profile.login,
            contributions: contributor.contributions,
            repos: vec![repo_name.to_string()],
            followers: profile.followers,
            following: profile.following,
            avatar_url: profile.avatar_url,
            issues,
            pull_requests,
        }
    }

    /// Fold a later branch into this record.
    ///
    /// Appends the repository and replaces the search results; contribution
    /// count and profile fields keep the values of the seeding branch.
    pub fn absorb(
        &mut self,
        repo_name: &str,
        issues: Vec<SearchItem>,
        pull_requests: Vec<SearchItem>,
    ) {
        self.repos.push(repo_name.to_string());
        self.issues = issues;
        self.pull_requests = pull_requests;
    }
}
