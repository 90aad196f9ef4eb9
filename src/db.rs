use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // Crawled resources. Rows are written by the ingestion process; this service only reads.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS web_crawler_resources (
            id TEXT PRIMARY KEY,
            parent_url TEXT NOT NULL DEFAULT '',
            google_drive_download_link TEXT NOT NULL DEFAULT '',
            name TEXT NOT NULL DEFAULT '',
            relative_path TEXT NOT NULL DEFAULT '',
            parent_directory TEXT NOT NULL DEFAULT '',
            django_relative_path TEXT NOT NULL DEFAULT '',
            google_cloud_storage_link TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now')),
            categories TEXT NOT NULL DEFAULT '[]',
            is_extracted INTEGER NOT NULL DEFAULT 0,
            extracted_content TEXT NOT NULL DEFAULT ''
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        (
            "idx_resources_parent_directory",
            "CREATE INDEX IF NOT EXISTS idx_resources_parent_directory ON web_crawler_resources(parent_directory)",
        ),
        (
            "idx_resources_created_at",
            "CREATE INDEX IF NOT EXISTS idx_resources_created_at ON web_crawler_resources(created_at DESC, id)",
        ),
        (
            "web_crawler_resources_google_drive_download_link_key",
            "CREATE UNIQUE INDEX IF NOT EXISTS web_crawler_resources_google_drive_download_link_key \
             ON web_crawler_resources(google_drive_download_link) WHERE google_drive_download_link <> ''",
        ),
        (
            "web_crawler_resources_django_relative_path_key",
            "CREATE UNIQUE INDEX IF NOT EXISTS web_crawler_resources_django_relative_path_key \
             ON web_crawler_resources(django_relative_path) WHERE django_relative_path <> ''",
        ),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
