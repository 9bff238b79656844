// Skill search over uploaded documents.
// Text extraction and matching are CPU-bound and run on the bounded worker pool.

pub mod aggregator;
pub mod corpus;
pub mod extractor;
pub mod fields;
pub mod handlers;
pub mod matcher;
pub mod observer;
pub mod pool;
pub mod processor;
pub mod scheduler;
pub mod types;

use thiserror::Error;

pub use scheduler::SkillSearch;
pub use types::{SearchSettings, SearchSummary};

/// Errors that abort a whole search. Per-document and per-batch failures never
/// reach this type.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search settings: {0}")]
    InvalidSettings(String),

    #[error("failed to list documents: {0}")]
    Corpus(anyhow::Error),

    #[error("worker pool closed before the search finished")]
    PoolClosed,

    #[error("search timed out after {secs}s")]
    TimedOut { secs: u64 },
}
