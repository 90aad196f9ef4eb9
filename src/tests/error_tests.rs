#[cfg(test)]
mod tests {
    use crate::error::{AppError, AppResult};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::NotFound("Resource not found".to_string());
        assert_eq!(format!("{}", error), "Not found: Resource not found");

        let error = AppError::Query { action: "fetch records", details: "disk I/O error".to_string() };
        assert_eq!(format!("{}", error), "Failed to fetch records: disk I/O error");
    }

    #[test]
    fn test_app_error_into_response() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal(anyhow::anyhow!("x")), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_query_error_hides_details() {
        let error = AppError::query("count resources")(sqlx::Error::PoolClosed);
        let (status, json) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "QUERY_FAILED");
        assert_eq!(json["error"]["message"], "Failed to count resources");
        assert!(json["error"].get("details").is_none());
        assert_eq!(json["status"], 500);
    }

    #[tokio::test]
    async fn test_internal_error_carries_error_id() {
        let (_, json) = body_json(AppError::Internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
        assert!(json["error"]["details"]["error_id"].is_string());
    }

    #[test]
    fn test_from_sqlx_error() {
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::NotFound(_)));
        assert!(matches!(AppError::from(sqlx::Error::PoolTimedOut), AppError::ServiceUnavailable(_)));
        assert!(matches!(AppError::from(sqlx::Error::PoolClosed), AppError::Database(_)));
    }

    #[test]
    fn test_from_anyhow_error() {
        fn fails() -> AppResult<()> {
            Err(anyhow::anyhow!("Test error"))?
        }
        match fails() {
            Err(AppError::Internal(e)) => assert_eq!(e.to_string(), "Test error"),
            other => panic!("Expected Internal variant, got {:?}", other.err()),
        }
    }
}
