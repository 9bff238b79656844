//! Single-document pipeline: extract → match → identity fields.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::search::extractor::TextExtractor;
use crate::search::fields::{extract_email, extract_name, extract_phone};
use crate::search::matcher::SkillMatcher;
use crate::search::observer::{SearchEvent, SearchObserver};
use crate::search::types::{round_secs, DocumentRecord, MatchRecord, StageTiming};

#[derive(Clone)]
pub struct DocumentProcessor {
    extractor: Arc<dyn TextExtractor>,
    observer: Arc<dyn SearchObserver>,
}

impl DocumentProcessor {
    pub fn new(extractor: Arc<dyn TextExtractor>, observer: Arc<dyn SearchObserver>) -> Self {
        Self {
            extractor,
            observer,
        }
    }

    /// Processes one document. Any failure, including a panic inside extraction,
    /// is recorded and yields `None`.
    pub fn process(&self, document: &DocumentRecord, matcher: &SkillMatcher) -> Option<MatchRecord> {
        match catch_unwind(AssertUnwindSafe(|| self.process_inner(document, matcher))) {
            Ok(record) => record,
            Err(payload) => {
                self.observer.record(SearchEvent::DocumentFailed {
                    document_id: document.id,
                    filename: document.filename.clone(),
                    error: panic_message(payload.as_ref()),
                });
                None
            }
        }
    }

    /// Runs every document of a batch in order, keeping only matches.
    pub fn process_batch(
        &self,
        batch: &[DocumentRecord],
        matcher: &SkillMatcher,
    ) -> Vec<MatchRecord> {
        batch
            .iter()
            .filter_map(|doc| self.process(doc, matcher))
            .collect()
    }

    fn process_inner(
        &self,
        document: &DocumentRecord,
        matcher: &SkillMatcher,
    ) -> Option<MatchRecord> {
        let started = Instant::now();
        let text = match self.extractor.extract(Path::new(&document.filepath)) {
            Ok(text) => text,
            Err(e) => {
                self.text_unavailable(document, e.to_string());
                return None;
            }
        };
        let read_time = started.elapsed().as_secs_f64();

        if text.trim().is_empty() {
            self.text_unavailable(document, "document contains no text".to_string());
            return None;
        }

        let match_started = Instant::now();
        let matched_skills = matcher.matches(&text);
        let match_time = match_started.elapsed().as_secs_f64();

        if matched_skills.is_empty() {
            return None;
        }

        let extract_started = Instant::now();
        let name = extract_name(&text);
        let email = extract_email(&text);
        let phone = extract_phone(&text);
        let extract_time = extract_started.elapsed().as_secs_f64();

        let timing = StageTiming {
            read_time: round_secs(read_time),
            match_time: round_secs(match_time),
            extract_time: round_secs(extract_time),
            total_time: round_secs(read_time + match_time + extract_time),
        };

        self.observer.record(SearchEvent::DocumentMatched {
            document_id: document.id,
            filename: document.filename.clone(),
            matched: matched_skills.len(),
            timing,
        });

        Some(MatchRecord {
            pdf_id: document.id,
            name,
            email,
            phone,
            matched_skills,
            timing: Some(timing),
        })
    }

    fn text_unavailable(&self, document: &DocumentRecord, reason: String) {
        self.observer.record(SearchEvent::TextUnavailable {
            document_id: document.id,
            filename: document.filename.clone(),
            reason,
        });
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;

    use super::*;
    use crate::search::extractor::ExtractError;

    /// What the scripted extractor does for a path.
    #[derive(Debug, Clone)]
    pub enum Script {
        Text(String),
        Slow(std::time::Duration, String),
        Fail,
        Panic,
    }

    /// Extractor driven by a path → behaviour table. Unknown paths fail.
    #[derive(Debug, Default)]
    pub struct ScriptedExtractor {
        scripts: HashMap<String, Script>,
    }

    impl ScriptedExtractor {
        pub fn with(mut self, path: &str, script: Script) -> Self {
            self.scripts.insert(path.to_string(), script);
            self
        }
    }

    impl TextExtractor for ScriptedExtractor {
        fn extract(&self, path: &Path) -> Result<String, ExtractError> {
            let key = path.to_string_lossy().into_owned();
            match self.scripts.get(&key) {
                Some(Script::Text(text)) => Ok(text.clone()),
                Some(Script::Slow(delay, text)) => {
                    std::thread::sleep(*delay);
                    Ok(text.clone())
                }
                Some(Script::Panic) => panic!("extractor blew up on {key}"),
                Some(Script::Fail) | None => Err(ExtractError::Pdf {
                    path: key,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    pub fn doc(id: i32) -> DocumentRecord {
        DocumentRecord {
            id,
            filename: format!("doc{id}.pdf"),
            filepath: format!("pdfs/doc{id}.pdf"),
            is_deleted: false,
        }
    }
}
