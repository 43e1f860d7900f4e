use crate::models::{AggregateRecord, ContributorRef, SearchItem, UserProfile};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Updated,
}

/// Insertion-ordered map of aggregate records keyed by login.
#[derive(Debug, Default)]
pub struct ContributorLedger {
    records: Vec<AggregateRecord>,
    index: HashMap<String, usize>,
}

impl ContributorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record for `profile.login` or fold this branch into the
    /// existing one. The lookup and the write happen in one call so a caller
    /// holding the ledger lock merges atomically.
    pub fn merge(
        &mut self,
        repo_name: &str,
        contributor: &ContributorRef,
        profile: UserProfile,
        issues: Vec<SearchItem>,
        pull_requests: Vec<SearchItem>,
    ) -> MergeOutcome {
        if let Some(&position) = self.index.get(&profile.login) {
            self.records[position].absorb(repo_name, issues, pull_requests);
            return MergeOutcome::Updated;
        }

        self.index.insert(profile.login.clone(), self.records.len());
        self.records.push(AggregateRecord::seed(
            repo_name,
            contributor,
            profile,
            issues,
            pull_requests,
        ));
        MergeOutcome::Inserted
    }

    #[cfg(test)]
    fn get(&self, login: &str) -> Option<&AggregateRecord> {
        self.index.get(login).map(|&position| &self.records[position])
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-insertion order.
    pub fn into_records(self) -> Vec<AggregateRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(login: &str, followers: u64) -> UserProfile {
        UserProfile {
            login: login.to_string(),
            followers,
            following: 0,
            avatar_url: String::new(),
        }
    }

    #[test]
    fn test_merge_inserts_then_updates() {
        let mut ledger = ContributorLedger::new();
        assert!(ledger.is_empty());

        let first = ledger.merge(
            "R1",
            &ContributorRef::new("alice", 5),
            profile("alice", 7),
            vec![],
            vec![],
        );
        let second = ledger.merge(
            "R2",
            &ContributorRef::new("alice", 2),
            profile("alice", 99),
            vec![json!({"id": 1})],
            vec![json!({"id": 2})],
        );

        assert_eq!(first, MergeOutcome::Inserted);
        assert_eq!(second, MergeOutcome::Updated);
        assert_eq!(ledger.len(), 1);

        let alice = ledger.get("alice").unwrap();
        assert_eq!(alice.repos, vec!["R1", "R2"]);
        assert_eq!(alice.contributions, 5);
        assert_eq!(alice.followers, 7);
        assert_eq!(alice.issues, vec![json!({"id": 1})]);
        assert_eq!(alice.pull_requests, vec![json!({"id": 2})]);
    }

    #[test]
    fn test_same_repository_twice_keeps_duplicate_entry() {
        let mut ledger = ContributorLedger::new();
        let contributor = ContributorRef::new("bob", 1);

        ledger.merge("R1", &contributor, profile("bob", 0), vec![], vec![]);
        ledger.merge("R1", &contributor, profile("bob", 0), vec![], vec![]);

        assert_eq!(ledger.get("bob").unwrap().repos, vec!["R1", "R1"]);
    }

    #[test]
    fn test_records_keep_first_insertion_order() {
        let mut ledger = ContributorLedger::new();
        for login in ["carol", "alice", "bob"] {
            ledger.merge(
                "R1",
                &ContributorRef::new(login, 1),
                profile(login, 0),
                vec![],
                vec![],
            );
        }
        ledger.merge("R2", &ContributorRef::new("alice", 1), profile("alice", 0), vec![], vec![]);

        let logins: Vec<String> = ledger.into_records().into_iter().map(|r| r.login).collect();
        assert_eq!(logins, vec!["carol", "alice", "bob"]);
    }

    #[test]
    fn test_profile_login_is_the_dedup_key() {
        let mut ledger = ContributorLedger::new();

        // The contributors listing and the profile can disagree on case.
        ledger.merge("R1", &ContributorRef::new("Alice", 1), profile("alice", 0), vec![], vec![]);
        ledger.merge("R2", &ContributorRef::new("alice", 1), profile("alice", 0), vec![], vec![]);

        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("Alice").is_none());
    }
}
