use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    directories::{self, DirectoryQuery},
    error::{AppError, AppResult},
    search::{self, ResourceQuery},
    state::AppState,
    types::CachedPayload,
};

fn record_failure(state: &AppState, err: AppError) -> AppError {
    if matches!(err, AppError::Query { .. }) {
        state.metrics.inc_query_failures();
    }
    err
}

// GET /v1/api/resources/?q1=..&q2=..&q3=..&q4=..&page=..&limit=..
pub async fn get_resources(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> AppResult<impl IntoResponse> {
    state.metrics.inc_resource_searches();
    let key = query.cache_key();

    if let Some(cached) = state.cache.get(&key).await {
        state.metrics.inc_cache_hits();
        tracing::debug!("Cache hit for {}", key);
        return Ok(Json(cached));
    }
    state.metrics.inc_cache_misses();
    tracing::debug!("Cache miss for {}", key);

    let outcome = search::search_resources(&state.db, &query).await.map_err(|e| record_failure(&state, e))?;
    state.metrics.add_relaxation_attempts(outcome.attempts as u64);

    let payload = Arc::new(CachedPayload::from(outcome.response));
    state.cache.set(key, payload.clone()).await;
    Ok(Json(payload))
}

// GET /v1/api/resources/parent-directories?search=..&page=..&limit=..
pub async fn get_parent_directories(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<impl IntoResponse> {
    state.metrics.inc_directory_listings();
    let key = query.cache_key();

    if let Some(cached) = state.cache.get(&key).await {
        state.metrics.inc_cache_hits();
        tracing::debug!("Cache hit for {}", key);
        return Ok(Json(cached));
    }
    state.metrics.inc_cache_misses();
    tracing::debug!("Cache miss for {}", key);

    let response = directories::list_parent_directories(&state.db, &query, &state.config.catalog.directory_prefix)
        .await
        .map_err(|e| record_failure(&state, e))?;

    let payload = Arc::new(CachedPayload::from(response));
    state.cache.set(key, payload.clone()).await;
    Ok(Json(payload))
}
