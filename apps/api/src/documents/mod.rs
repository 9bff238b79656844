// Uploaded document management: disk storage, the `pdfs` table, and its HTTP handlers.
// The search core only sees documents through `repository::PgDocumentCorpus`.

pub mod handlers;
pub mod repository;
pub mod storage;
