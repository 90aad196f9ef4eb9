//! Integration and unit tests for the catalog backend.
//!
//! ## Test Modules
//!
//! - **api_tests**: router-level tests for the catalog, taxonomy and health endpoints
//! - **search_tests**: relaxation, normalization and pagination against SQLite
//! - **directory_tests**: distinct-directory pagination and prefix stripping
//! - **config_tests**: configuration loading and validation
//! - **db_tests**: schema initialization
//! - **error_tests**: error rendering and conversions
//!
//! Individual modules can be run with e.g. `cargo test search_tests`.

pub mod db_tests;
pub mod error_tests;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

/// In-memory database with the schema applied. A single connection keeps the
/// memory database alive for the whole test.
pub(crate) async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    pool
}

/// Columns a test cares about; everything else keeps the table default.
#[derive(Default)]
pub(crate) struct ResourceFixture {
    pub name: &'static str,
    pub parent_directory: &'static str,
    pub relative_path: &'static str,
    pub google_drive_download_link: &'static str,
    pub google_cloud_storage_link: &'static str,
    pub extracted_content: &'static str,
    pub created_at: Option<&'static str>,
}

pub(crate) async fn insert_resource(pool: &SqlitePool, fixture: ResourceFixture) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO web_crawler_resources
            (id, name, parent_directory, relative_path, google_drive_download_link,
             google_cloud_storage_link, extracted_content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, COALESCE(?8, strftime('%Y-%m-%dT%H:%M:%SZ','now')))",
    )
    .bind(id.to_string())
    .bind(fixture.name)
    .bind(fixture.parent_directory)
    .bind(fixture.relative_path)
    .bind(fixture.google_drive_download_link)
    .bind(fixture.google_cloud_storage_link)
    .bind(fixture.extracted_content)
    .bind(fixture.created_at)
    .execute(pool)
    .await
    .unwrap();
    id
}

pub(crate) async fn insert_named(pool: &SqlitePool, name: &'static str) -> Uuid {
    insert_resource(pool, ResourceFixture { name, ..Default::default() }).await
}
