#[cfg(test)]
mod tests {
    use crate::tests::setup_test_db;
    use sqlx::Row;

    async fn sqlite_objects(pool: &sqlx::SqlitePool, kind: &str) -> Vec<String> {
        sqlx::query("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name")
            .bind(kind)
            .fetch_all(pool)
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.get::<String, _>("name"))
            .collect()
    }

    #[tokio::test]
    async fn test_schema_created() {
        let pool = setup_test_db().await;

        let tables = sqlite_objects(&pool, "table").await;
        assert!(tables.contains(&"web_crawler_resources".to_string()));

        let indexes = sqlite_objects(&pool, "index").await;
        for expected in [
            "idx_resources_parent_directory",
            "idx_resources_created_at",
            "web_crawler_resources_google_drive_download_link_key",
            "web_crawler_resources_django_relative_path_key",
        ] {
            assert!(indexes.contains(&expected.to_string()), "missing index {}", expected);
        }
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let pool = setup_test_db().await;
        crate::db::init_db(&pool).await.unwrap();
        crate::db::init_db(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_column_defaults() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO web_crawler_resources (id) VALUES ('00000000-0000-0000-0000-000000000001')")
            .execute(&pool)
            .await
            .unwrap();

        let row = sqlx::query("SELECT name, categories, is_extracted, created_at FROM web_crawler_resources")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("name"), "");
        assert_eq!(row.get::<String, _>("categories"), "[]");
        assert_eq!(row.get::<i64, _>("is_extracted"), 0);
        assert!(row.get::<String, _>("created_at").ends_with('Z'));
    }

    #[tokio::test]
    async fn test_unique_links_ignore_empty_values() {
        let pool = setup_test_db().await;
        let insert = "INSERT INTO web_crawler_resources (id, google_drive_download_link) VALUES (?1, ?2)";

        // rows without a link never collide
        for id in ["a", "b"] {
            sqlx::query(insert).bind(id).bind("").execute(&pool).await.unwrap();
        }

        sqlx::query(insert).bind("c").bind("https://drive/x").execute(&pool).await.unwrap();
        let dup = sqlx::query(insert).bind("d").bind("https://drive/x").execute(&pool).await;
        assert!(dup.is_err());
    }
}
