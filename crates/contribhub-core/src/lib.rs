pub mod models;
pub mod ledger;
pub mod source;
pub mod engine;
pub mod error;

// Re-exports
pub use models::{AggregateRecord, ContributorRef, Repository, SearchItem, UserProfile};
pub use ledger::{ContributorLedger, MergeOutcome};
pub use source::{ActivitySource, SearchKind};
pub use engine::{validate_login, AggregationEngine, EngineConfig, RunSummary};
pub use error::{Error, FetchError, Result};
