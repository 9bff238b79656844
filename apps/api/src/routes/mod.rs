pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents
        .route("/api/v1/pdfs", get(documents::handle_list))
        .route("/api/v1/pdfs/upload", post(documents::handle_upload))
        .route(
            "/api/v1/pdfs/upload-multiple",
            post(documents::handle_upload_multiple),
        )
        .route(
            "/api/v1/pdfs/:id",
            get(documents::handle_get).delete(documents::handle_delete),
        )
        // Skill search
        .route(
            "/api/v1/pdfs/search-skills",
            post(search::handle_search_skills),
        )
        .route(
            "/api/v1/pdfs/search-skills/sequential",
            post(search::handle_search_skills_sequential),
        )
        .with_state(state)
}
