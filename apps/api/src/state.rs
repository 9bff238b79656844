use sqlx::PgPool;

use crate::config::Config;
use crate::search::SkillSearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Skill search engine wired to the `pdfs` corpus and the tracing observer.
    pub search: SkillSearch,
}
