use serde::{Deserialize, Serialize};

/// A stored document as seen by the search core. Snapshotted once per search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i32,
    pub filename: String,
    pub filepath: String,
    pub is_deleted: bool,
}

/// Per-stage timing for one matched document, in seconds (two decimals).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub read_time: f64,
    pub match_time: f64,
    pub extract_time: f64,
    pub total_time: f64,
}

/// One document that matched at least one requested skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub pdf_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Subset of the requested skills, in request order.
    pub matched_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<StageTiming>,
}

/// Complete result of one skill search. Never returned partially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub results: Vec<MatchRecord>,
    pub time_taken_seconds: f64,
    pub total_pdfs_processed: usize,
    pub number_of_batches: usize,
    pub average_pdf_read_time: f64,
}

/// Search tunables. `max_workers` is the cap before CPU clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_workers: usize,
    pub batch_size: usize,
    pub wave_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_workers: 4,
            batch_size: 5,
            wave_size: 10,
        }
    }
}

/// Rounds seconds to two decimals for reporting.
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_secs_two_decimals() {
        assert_eq!(round_secs(1.23456), 1.23);
        assert_eq!(round_secs(0.005), 0.01);
        assert_eq!(round_secs(0.0), 0.0);
    }

    #[test]
    fn test_default_settings_match_reference_tuning() {
        let s = SearchSettings::default();
        assert_eq!(s.max_workers, 4);
        assert_eq!(s.batch_size, 5);
        assert_eq!(s.wave_size, 10);
    }

    #[test]
    fn test_match_record_omits_missing_timing() {
        let record = MatchRecord {
            pdf_id: 7,
            name: "Ada".to_string(),
            email: String::new(),
            phone: String::new(),
            matched_skills: vec!["Rust".to_string()],
            timing: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("timing").is_none());
        assert_eq!(json["pdf_id"], 7);
        assert_eq!(json["matched_skills"][0], "Rust");
    }
}
