use std::time::Duration;

use crate::search::types::{round_secs, MatchRecord, SearchSummary};

/// Flattens per-batch results in batch order and computes the summary statistics.
///
/// `total_documents` is the snapshot size, not the match count. The average read time
/// covers matched documents that carry timing; it is zero when nothing matched.
pub fn aggregate(
    batch_results: Vec<Vec<MatchRecord>>,
    total_documents: usize,
    number_of_batches: usize,
    elapsed: Duration,
) -> SearchSummary {
    let results: Vec<MatchRecord> = batch_results.into_iter().flatten().collect();

    let read_times: Vec<f64> = results
        .iter()
        .filter_map(|r| r.timing.map(|t| t.read_time))
        .collect();
    let average_pdf_read_time = if read_times.is_empty() {
        0.0
    } else {
        round_secs(read_times.iter().sum::<f64>() / read_times.len() as f64)
    };

    SearchSummary {
        results,
        time_taken_seconds: round_secs(elapsed.as_secs_f64()),
        total_pdfs_processed: total_documents,
        number_of_batches,
        average_pdf_read_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::StageTiming;

    fn record(id: i32, read_time: Option<f64>) -> MatchRecord {
        MatchRecord {
            pdf_id: id,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            matched_skills: vec!["Rust".to_string()],
            timing: read_time.map(|read_time| StageTiming {
                read_time,
                ..StageTiming::default()
            }),
        }
    }

    #[test]
    fn test_flattens_in_batch_order() {
        let summary = aggregate(
            vec![vec![record(1, None), record(2, None)], vec![], vec![record(9, None)]],
            12,
            3,
            Duration::from_millis(1234),
        );
        let ids: Vec<i32> = summary.results.iter().map(|r| r.pdf_id).collect();
        assert_eq!(ids, vec![1, 2, 9]);
        assert_eq!(summary.total_pdfs_processed, 12);
        assert_eq!(summary.number_of_batches, 3);
        assert_eq!(summary.time_taken_seconds, 1.23);
    }

    #[test]
    fn test_average_read_time_over_matches_only() {
        let summary = aggregate(
            vec![vec![record(1, Some(0.2)), record(2, Some(0.4))]],
            10,
            2,
            Duration::ZERO,
        );
        assert_eq!(summary.average_pdf_read_time, 0.3);
    }

    #[test]
    fn test_average_read_time_zero_without_matches() {
        let summary = aggregate(vec![vec![], vec![]], 7, 2, Duration::ZERO);
        assert!(summary.results.is_empty());
        assert_eq!(summary.average_pdf_read_time, 0.0);
        assert_eq!(summary.total_pdfs_processed, 7);
    }
}
