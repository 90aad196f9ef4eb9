use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Health check endpoint - lightweight, no DB access
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot(state.cache.len().await);
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot(state.cache.len().await);
    let body = format!(
        "# HELP cbcexams_resource_searches Resource search requests\n# TYPE cbcexams_resource_searches counter\ncbcexams_resource_searches {}\n\
# HELP cbcexams_directory_listings Directory listing requests\n# TYPE cbcexams_directory_listings counter\ncbcexams_directory_listings {}\n\
# HELP cbcexams_cache_hits Responses served from cache\n# TYPE cbcexams_cache_hits counter\ncbcexams_cache_hits {}\n\
# HELP cbcexams_cache_misses Responses computed from the database\n# TYPE cbcexams_cache_misses counter\ncbcexams_cache_misses {}\n\
# HELP cbcexams_relaxation_attempts Filtered count queries issued while relaxing searches\n# TYPE cbcexams_relaxation_attempts counter\ncbcexams_relaxation_attempts {}\n\
# HELP cbcexams_query_failures Failed catalog queries\n# TYPE cbcexams_query_failures counter\ncbcexams_query_failures {}\n\
# HELP cbcexams_cache_entries Entries currently held by the response cache\n# TYPE cbcexams_cache_entries gauge\ncbcexams_cache_entries {}\n\
# HELP cbcexams_uptime_seconds Uptime seconds\n# TYPE cbcexams_uptime_seconds gauge\ncbcexams_uptime_seconds {}\n",
        m.resource_searches,
        m.directory_listings,
        m.cache_hits,
        m.cache_misses,
        m.relaxation_attempts,
        m.query_failures,
        m.cache_entries,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
