//! Observability sink for the search pipeline.
//!
//! Components receive an `Arc<dyn SearchObserver>` instead of logging through a
//! global. `TracingObserver` is the production sink.

use tracing::{debug, error, info, warn};

use crate::search::types::StageTiming;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    Started {
        documents: usize,
        keywords: Vec<String>,
    },
    BatchesPlanned {
        batches: usize,
        batch_size: usize,
        workers: usize,
    },
    TextUnavailable {
        document_id: i32,
        filename: String,
        reason: String,
    },
    DocumentFailed {
        document_id: i32,
        filename: String,
        error: String,
    },
    DocumentMatched {
        document_id: i32,
        filename: String,
        matched: usize,
        timing: StageTiming,
    },
    BatchFailed {
        batch: usize,
        error: String,
    },
    WaveCompleted {
        wave: usize,
        batches: usize,
        matches: usize,
    },
    Completed {
        matches: usize,
        elapsed_secs: f64,
    },
}

pub trait SearchObserver: Send + Sync {
    fn record(&self, event: SearchEvent);
}

/// Forwards search events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn record(&self, event: SearchEvent) {
        match event {
            SearchEvent::Started {
                documents,
                keywords,
            } => info!(documents, ?keywords, "Starting skill search"),
            SearchEvent::BatchesPlanned {
                batches,
                batch_size,
                workers,
            } => info!(batches, batch_size, workers, "Created search batches"),
            SearchEvent::TextUnavailable {
                document_id,
                filename,
                reason,
            } => warn!(document_id, %filename, %reason, "No text extracted from document"),
            SearchEvent::DocumentFailed {
                document_id,
                filename,
                error,
            } => error!(document_id, %filename, %error, "Error processing document"),
            SearchEvent::DocumentMatched {
                document_id,
                filename,
                matched,
                timing,
            } => debug!(
                document_id,
                %filename,
                matched,
                read_time = timing.read_time,
                match_time = timing.match_time,
                extract_time = timing.extract_time,
                total_time = timing.total_time,
                "Document matched"
            ),
            SearchEvent::BatchFailed { batch, error } => {
                error!(batch, %error, "Search batch crashed; its results are lost")
            }
            SearchEvent::WaveCompleted {
                wave,
                batches,
                matches,
            } => debug!(wave, batches, matches, "Search wave completed"),
            SearchEvent::Completed {
                matches,
                elapsed_secs,
            } => info!(matches, elapsed_secs, "Skill search completed"),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every event for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        events: Mutex<Vec<SearchEvent>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<SearchEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SearchObserver for RecordingObserver {
        fn record(&self, event: SearchEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
