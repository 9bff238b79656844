use anyhow::Result;
use async_trait::async_trait;

use crate::search::types::DocumentRecord;

/// Source of the documents a search runs over. Consulted once per search.
#[async_trait]
pub trait DocumentCorpus: Send + Sync {
    async fn list_non_deleted_documents(&self) -> Result<Vec<DocumentRecord>>;
}

#[cfg(test)]
pub use testing::InMemoryCorpus;

#[cfg(test)]
mod testing {
    use super::*;

    /// Fixed in-memory corpus. Honors the soft-delete flag like the database does.
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryCorpus {
        documents: Vec<DocumentRecord>,
    }

    impl InMemoryCorpus {
        pub fn new(documents: Vec<DocumentRecord>) -> Self {
            Self { documents }
        }
    }

    #[async_trait]
    impl DocumentCorpus for InMemoryCorpus {
        async fn list_non_deleted_documents(&self) -> Result<Vec<DocumentRecord>> {
            Ok(self
                .documents
                .iter()
                .filter(|d| !d.is_deleted)
                .cloned()
                .collect())
        }
    }
}
