//! Text extraction for stored documents.
//!
//! Extraction failures are reported as `ExtractError` so the caller can record a
//! diagnostic; the document processor turns every failure into "no text".

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF {path}: {message}")]
    Pdf { path: String, message: String },
}

/// Produces the raw text of a stored document.
///
/// Implementations run on worker threads and must not hold shared mutable state.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Default extractor: plain-text files are read directly, everything else is parsed as PDF.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextExtractor;

impl TextExtractor for FileTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.display().to_string(),
            source,
        })?;

        if is_plain_text(path) {
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }

        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_plain_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "Jane Doe\nRust, SQL").unwrap();

        let text = FileTextExtractor.extract(file.path()).unwrap();
        assert!(text.starts_with("Jane Doe"));
        assert!(text.contains("SQL"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.pdf");

        let err = FileTextExtractor.extract(&missing).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().contains("gone.pdf"));
    }

    #[test]
    fn test_corrupt_pdf_is_error_not_panic() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let path = file.path().to_path_buf();
        let result = std::panic::catch_unwind(|| FileTextExtractor.extract(&path));
        // pdf-extract may report the damage as an error or by panicking; either way no text.
        if let Ok(inner) = result {
            assert!(inner.is_err());
        }
    }

    #[test]
    fn test_plain_text_detection_is_case_insensitive() {
        assert!(is_plain_text(Path::new("cv.TXT")));
        assert!(is_plain_text(Path::new("notes.md")));
        assert!(!is_plain_text(Path::new("cv.pdf")));
        assert!(!is_plain_text(Path::new("no_extension")));
    }
}
