use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::search::types::DocumentRecord;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentRow {
    pub id: i32,
    pub filename: String,
    pub filepath: String,
    pub is_deleted: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl From<DocumentRow> for DocumentRecord {
    fn from(row: DocumentRow) -> Self {
        DocumentRecord {
            id: row.id,
            filename: row.filename,
            filepath: row.filepath,
            is_deleted: row.is_deleted,
        }
    }
}
