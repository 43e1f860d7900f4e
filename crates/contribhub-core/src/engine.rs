use crate::error::{Error, FetchError, Result};
use crate::ledger::{ContributorLedger, MergeOutcome};
use crate::models::{AggregateRecord, ContributorRef, Repository, SearchItem};
use crate::source::{ActivitySource, SearchKind};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tracing::Instrument;
use uuid::Uuid;

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 16;

/// Longest login GitHub accepts.
pub const MAX_LOGIN_LENGTH: usize = 39;

/// Check a caller-supplied login before it is spliced into a search query.
///
/// Logins are ASCII letters, digits and `-`, so anything else (whitespace,
/// `:` qualifiers) would widen the search beyond the organization.
pub fn validate_login(login: &str) -> Result<()> {
    let well_formed = !login.is_empty()
        && login.len() <= MAX_LOGIN_LENGTH
        && login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(Error::InvalidLogin(login.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Organization used by the single-user lookups
    pub organization: String,
    /// Upper bound on remote calls in flight across the whole run
    pub max_concurrent_requests: usize,
}

impl EngineConfig {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }

    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit.max(1);
        self
    }
}

/// Counters describing one aggregation run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub organization: String,
    pub started_at: DateTime<Utc>,
    pub repositories: usize,
    pub repositories_abandoned: usize,
    pub branches_merged: usize,
    pub branches_abandoned: usize,
    pub contributors: usize,
    pub elapsed_ms: i64,
}

#[derive(Default)]
struct RunCounters {
    repositories_abandoned: AtomicUsize,
    branches_merged: AtomicUsize,
    branches_abandoned: AtomicUsize,
}

/// State shared by every branch of a single run.
struct Run<'a> {
    org: &'a str,
    ledger: Mutex<ContributorLedger>,
    counters: RunCounters,
}

/// Fans out over an organization's repositories and their contributors and
/// folds the results into one record per contributor.
#[derive(Clone)]
pub struct AggregationEngine {
    source: Arc<dyn ActivitySource>,
    config: EngineConfig,
    permits: Arc<Semaphore>,
}

impl AggregationEngine {
    pub fn new(source: Arc<dyn ActivitySource>, config: EngineConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));

        Self {
            source,
            config,
            permits,
        }
    }

    pub fn organization(&self) -> &str {
        &self.config.organization
    }

    /// Aggregate every contributor of `org`.
    ///
    /// Fails only when the repository listing itself is unavailable. Failed
    /// contributor listings and profile fetches drop their own branch and the
    /// rest of the run continues.
    pub async fn aggregate(&self, org: &str) -> Result<Vec<AggregateRecord>> {
        let (records, _) = self.aggregate_with_summary(org).await?;
        Ok(records)
    }

    /// Same as [`aggregate`](Self::aggregate), also returning the run counters
    pub async fn aggregate_with_summary(
        &self,
        org: &str,
    ) -> Result<(Vec<AggregateRecord>, RunSummary)> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("aggregate", %run_id, org);

        self.run_aggregation(org, run_id).instrument(span).await
    }

    /// Issues authored by `login` in the configured organization
    pub async fn fetch_issues_for(&self, login: &str) -> Result<Vec<SearchItem>> {
        validate_login(login)?;
        self.search(login, &self.config.organization, SearchKind::Issue)
            .await
            .map_err(Error::Unavailable)
    }

    /// Pull requests authored by `login` in the configured organization
    pub async fn fetch_pull_requests_for(&self, login: &str) -> Result<Vec<SearchItem>> {
        validate_login(login)?;
        self.search(login, &self.config.organization, SearchKind::PullRequest)
            .await
            .map_err(Error::Unavailable)
    }

    async fn run_aggregation(
        &self,
        org: &str,
        run_id: Uuid,
    ) -> Result<(Vec<AggregateRecord>, RunSummary)> {
        let started_at: DateTime<Utc> = Utc::now();
        tracing::info!("Aggregating contributors for organization {}", org);

        let repositories = self
            .with_permit(self.source.list_repositories(org))
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch repositories for {}: {}", org, e);
                Error::RepositoriesUnavailable(e)
            })?;

        tracing::debug!("Found {} repositories", repositories.len());

        let run = Run {
            org,
            ledger: Mutex::new(ContributorLedger::new()),
            counters: RunCounters::default(),
        };

        join_all(
            repositories
                .iter()
                .map(|repo| self.aggregate_repository(&run, repo)),
        )
        .await;

        let records = run.ledger.into_inner().into_records();
        let summary = RunSummary {
            run_id,
            organization: org.to_string(),
            started_at,
            repositories: repositories.len(),
            repositories_abandoned: run.counters.repositories_abandoned.load(Ordering::Relaxed),
            branches_merged: run.counters.branches_merged.load(Ordering::Relaxed),
            branches_abandoned: run.counters.branches_abandoned.load(Ordering::Relaxed),
            contributors: records.len(),
            elapsed_ms: (Utc::now() - started_at).num_milliseconds(),
        };

        tracing::info!(
            repositories = summary.repositories,
            repositories_abandoned = summary.repositories_abandoned,
            branches_merged = summary.branches_merged,
            branches_abandoned = summary.branches_abandoned,
            elapsed_ms = summary.elapsed_ms,
            "Aggregated {} contributors",
            summary.contributors
        );

        Ok((records, summary))
    }

    async fn aggregate_repository(&self, run: &Run<'_>, repo: &Repository) {
        let contributors = match self
            .with_permit(self.source.list_contributors(run.org, &repo.name))
            .await
        {
            Ok(contributors) => contributors,
            Err(e) => {
                tracing::warn!("Skipping repository {}: contributors unavailable: {}", repo, e);
                run.counters
                    .repositories_abandoned
                    .fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        tracing::debug!("Repository {} has {} contributors", repo, contributors.len());

        join_all(
            contributors
                .iter()
                .map(|contributor| self.aggregate_contributor(run, &repo.name, contributor)),
        )
        .await;
    }

    async fn aggregate_contributor(&self, run: &Run<'_>, repo_name: &str, contributor: &ContributorRef) {
        let profile = match self
            .with_permit(self.source.fetch_user_profile(&contributor.login))
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(
                    "Skipping contributor {} in {}: profile unavailable: {}",
                    contributor.login,
                    repo_name,
                    e
                );
                run.counters.branches_abandoned.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        let (issues, pull_requests) = tokio::join!(
            self.search_or_empty(&profile.login, run.org, SearchKind::Issue),
            self.search_or_empty(&profile.login, run.org, SearchKind::PullRequest),
        );

        let login = profile.login.clone();
        let outcome = run
            .ledger
            .lock()
            .await
            .merge(repo_name, contributor, profile, issues, pull_requests);

        if outcome == MergeOutcome::Inserted {
            tracing::debug!("New contributor {} via {}", login, repo_name);
        }
        run.counters.branches_merged.fetch_add(1, Ordering::Relaxed);
    }

    async fn search(
        &self,
        login: &str,
        org: &str,
        kind: SearchKind,
    ) -> std::result::Result<Vec<SearchItem>, FetchError> {
        match kind {
            SearchKind::Issue => {
                self.with_permit(self.source.search_user_issues(login, org))
                    .await
            }
            SearchKind::PullRequest => {
                self.with_permit(self.source.search_user_pull_requests(login, org))
                    .await
            }
        }
    }

    /// A failed search reads as an empty one inside an aggregation run.
    async fn search_or_empty(&self, login: &str, org: &str, kind: SearchKind) -> Vec<SearchItem> {
        self.search(login, org, kind).await.unwrap_or_else(|e| {
            tracing::warn!("Search for {} by {} failed, using empty list: {}", kind, login, e);
            Vec::new()
        })
    }

    /// Run one remote call under a concurrency permit.
    ///
    /// The permit covers the call only, never a whole branch, so nested
    /// fan-out cannot starve itself.
    async fn with_permit<F, T>(&self, request: F) -> T
    where
        F: Future<Output = T>,
    {
        let _permit = self.permits.acquire().await.ok();
        request.await
    }
}
