//! On-disk storage for uploaded documents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// A document written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub filepath: String,
}

pub fn is_pdf(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// `<uuid-hex>_<YYYYmmddHHMMSS><ext>`, keeping the original extension.
pub fn unique_filename(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!(
        "{}_{}{}",
        Uuid::new_v4().simple(),
        Utc::now().format("%Y%m%d%H%M%S"),
        ext
    )
}

pub async fn save_upload(upload_dir: &Path, original: &str, content: Bytes) -> Result<StoredFile> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", upload_dir.display()))?;

    let filename = unique_filename(original);
    let path: PathBuf = upload_dir.join(&filename);
    tokio::fs::write(&path, &content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = content.len(), "Saved document to disk");
    Ok(StoredFile {
        filename,
        filepath: path.display().to_string(),
    })
}
