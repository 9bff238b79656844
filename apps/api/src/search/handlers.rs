use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::search::{SearchError, SearchSummary};
use crate::state::AppState;

/// Collects every `skills=` value from the query string, in order.
fn skills_from_query(params: Vec<(String, String)>) -> Result<Vec<String>, AppError> {
    let skills: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == "skills")
        .map(|(_, value)| value)
        .filter(|value| !value.trim().is_empty())
        .collect();

    if skills.is_empty() {
        return Err(AppError::Validation(
            "At least one non-empty `skills` parameter is required".to_string(),
        ));
    }
    Ok(skills)
}

/// POST /api/v1/pdfs/search-skills?skills=..&skills=..
pub async fn handle_search_skills(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchSummary>, AppError> {
    let skills = skills_from_query(params)?;
    let secs = state.config.search_timeout_secs;

    // Dropping the search future on timeout releases its worker pool.
    let summary = tokio::time::timeout(Duration::from_secs(secs), state.search.search(skills))
        .await
        .map_err(|_| SearchError::TimedOut { secs })??;
    Ok(Json(summary))
}

/// POST /api/v1/pdfs/search-skills/sequential?skills=..
pub async fn handle_search_skills_sequential(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchSummary>, AppError> {
    let skills = skills_from_query(params)?;
    let secs = state.config.search_timeout_secs;

    let summary = tokio::time::timeout(
        Duration::from_secs(secs),
        state.search.search_sequential(skills),
    )
    .await
    .map_err(|_| SearchError::TimedOut { secs })??;
    Ok(Json(summary))
}
