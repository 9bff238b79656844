//! Batch/wave scheduling of a skill search.
//!
//! # Flow
//! 1. Snapshot the non-deleted corpus once.
//! 2. Partition it into batches of `batch_size`, in corpus order.
//! 3. Acquire a `WorkerPool` of `min(max_workers, cores)` for the lifetime of the search.
//! 4. Submit batches in waves of `wave_size`; a wave is awaited in full before the next
//!    one starts, and the task yields to the runtime between waves.
//! 5. Flatten and summarize.
//!
//! A crashed batch loses only its own results. Pool, corpus and settings errors abort
//! the search with no summary.

use std::sync::Arc;
use std::time::Instant;

use crate::search::aggregator::aggregate;
use crate::search::corpus::DocumentCorpus;
use crate::search::matcher::SkillMatcher;
use crate::search::observer::{SearchEvent, SearchObserver};
use crate::search::pool::WorkerPool;
use crate::search::processor::{panic_message, DocumentProcessor};
use crate::search::types::{DocumentRecord, MatchRecord, SearchSettings, SearchSummary};
use crate::search::SearchError;

/// Splits `items` into consecutive chunks of at most `size`, preserving order.
pub fn partition<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    items.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

#[derive(Clone)]
pub struct SkillSearch {
    corpus: Arc<dyn DocumentCorpus>,
    processor: DocumentProcessor,
    observer: Arc<dyn SearchObserver>,
    settings: SearchSettings,
}

impl SkillSearch {
    pub fn new(
        corpus: Arc<dyn DocumentCorpus>,
        processor: DocumentProcessor,
        observer: Arc<dyn SearchObserver>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            corpus,
            processor,
            observer,
            settings,
        }
    }

    /// Parallel search: batches across a bounded worker pool, in waves.
    pub async fn search(&self, keywords: Vec<String>) -> Result<SearchSummary, SearchError> {
        let started = Instant::now();
        validate(&self.settings)?;

        let documents = self.snapshot(&keywords).await?;
        let batches = partition(&documents, self.settings.batch_size);
        let number_of_batches = batches.len();

        let pool = WorkerPool::new(self.settings.max_workers)?;
        self.observer.record(SearchEvent::BatchesPlanned {
            batches: number_of_batches,
            batch_size: self.settings.batch_size,
            workers: pool.size(),
        });

        let matcher = Arc::new(SkillMatcher::new(&keywords));
        let batch_results = self.run_waves(&pool, batches, matcher).await?;
        drop(pool);

        let summary = aggregate(
            batch_results,
            documents.len(),
            number_of_batches,
            started.elapsed(),
        );
        self.completed(&summary);
        Ok(summary)
    }

    /// Single-worker search over the whole corpus. Each document is read once.
    pub async fn search_sequential(
        &self,
        keywords: Vec<String>,
    ) -> Result<SearchSummary, SearchError> {
        let started = Instant::now();
        let documents = self.snapshot(&keywords).await?;
        let number_of_batches = usize::from(!documents.is_empty());

        let processor = self.processor.clone();
        let matcher = SkillMatcher::new(&keywords);
        let total_documents = documents.len();
        let results = tokio::task::spawn_blocking(move || processor.process_batch(&documents, &matcher))
            .await
            .unwrap_or_else(|e| {
                let error = if e.is_panic() {
                    panic_message(e.into_panic().as_ref())
                } else {
                    "worker cancelled".to_string()
                };
                self.observer.record(SearchEvent::BatchFailed { batch: 0, error });
                Vec::new()
            });

        let summary = aggregate(
            vec![results],
            total_documents,
            number_of_batches,
            started.elapsed(),
        );
        self.completed(&summary);
        Ok(summary)
    }

    async fn snapshot(&self, keywords: &[String]) -> Result<Vec<DocumentRecord>, SearchError> {
        let documents: Vec<DocumentRecord> = self
            .corpus
            .list_non_deleted_documents()
            .await
            .map_err(SearchError::Corpus)?
            .into_iter()
            .filter(|d| !d.is_deleted)
            .collect();

        self.observer.record(SearchEvent::Started {
            documents: documents.len(),
            keywords: keywords.to_vec(),
        });
        Ok(documents)
    }

    async fn run_waves(
        &self,
        pool: &WorkerPool,
        batches: Vec<Vec<DocumentRecord>>,
        matcher: Arc<SkillMatcher>,
    ) -> Result<Vec<Vec<MatchRecord>>, SearchError> {
        let mut collected = Vec::with_capacity(batches.len());
        let mut remaining = batches.into_iter();
        let mut wave_index = 0;

        loop {
            let wave: Vec<Vec<DocumentRecord>> =
                remaining.by_ref().take(self.settings.wave_size).collect();
            if wave.is_empty() {
                break;
            }
            let first_batch = collected.len();
            let wave_len = wave.len();

            let jobs: Vec<_> = wave
                .into_iter()
                .map(|batch| {
                    let processor = self.processor.clone();
                    let matcher = matcher.clone();
                    move || processor.process_batch(&batch, &matcher)
                })
                .collect();

            let mut wave_matches = 0;
            for (offset, outcome) in pool.run_all(jobs).await?.into_iter().enumerate() {
                match outcome {
                    Ok(results) => {
                        wave_matches += results.len();
                        collected.push(results);
                    }
                    Err(error) => {
                        self.observer.record(SearchEvent::BatchFailed {
                            batch: first_batch + offset,
                            error,
                        });
                        collected.push(Vec::new());
                    }
                }
            }

            self.observer.record(SearchEvent::WaveCompleted {
                wave: wave_index,
                batches: wave_len,
                matches: wave_matches,
            });
            wave_index += 1;
            tokio::task::yield_now().await;
        }

        Ok(collected)
    }

    fn completed(&self, summary: &SearchSummary) {
        self.observer.record(SearchEvent::Completed {
            matches: summary.results.len(),
            elapsed_secs: summary.time_taken_seconds,
        });
    }
}

fn validate(settings: &SearchSettings) -> Result<(), SearchError> {
    if settings.batch_size == 0 {
        return Err(SearchError::InvalidSettings(
            "batch size must be at least 1".to_string(),
        ));
    }
    if settings.wave_size == 0 {
        return Err(SearchError::InvalidSettings(
            "wave size must be at least 1".to_string(),
        ));
    }
    Ok(())
}
