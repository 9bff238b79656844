use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::document::DocumentRow;
use crate::search::corpus::DocumentCorpus;
use crate::search::types::DocumentRecord;

pub async fn insert_document(pool: &PgPool, filename: &str, filepath: &str) -> Result<DocumentRow> {
    let row = sqlx::query_as::<_, DocumentRow>(
        r#"
        INSERT INTO pdfs (filename, filepath)
        VALUES ($1, $2)
        RETURNING id, filename, filepath, is_deleted, uploaded_at
        "#,
    )
    .bind(filename)
    .bind(filepath)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn get_document(pool: &PgPool, id: i32) -> Result<Option<DocumentRow>> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, filename, filepath, is_deleted, uploaded_at FROM pdfs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_documents(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<DocumentRow>> {
    let rows = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, filename, filepath, is_deleted, uploaded_at
        FROM pdfs
        WHERE is_deleted = FALSE
        ORDER BY id
        OFFSET $1 LIMIT $2
        "#,
    )
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Marks a document deleted. Returns false if no such document exists.
pub async fn soft_delete_document(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("UPDATE pdfs SET is_deleted = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Search corpus backed by the `pdfs` table.
#[derive(Clone)]
pub struct PgDocumentCorpus {
    pool: PgPool,
}

impl PgDocumentCorpus {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentCorpus for PgDocumentCorpus {
    async fn list_non_deleted_documents(&self) -> Result<Vec<DocumentRecord>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, filename, filepath, is_deleted, uploaded_at
            FROM pdfs
            WHERE is_deleted = FALSE
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(DocumentRecord::from).collect())
    }
}
