//! Distinct parent-directory listing.
//!
//! Pagination runs over the set of distinct `parent_directory` values, not over
//! resources: one page holds `limit` directories with all of their members.

use std::collections::BTreeMap;

use serde::Deserialize;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::{
    error::{AppError, AppResult},
    pagination::{PageRequest, Pagination, RESOURCE_DEFAULT_LIMIT},
    search::{escape_like_pattern, parse_resource_id},
    types::{DirectoryMember, DirectoryResponse},
};

/// Query string of `GET /v1/api/resources/parent-directories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl DirectoryQuery {
    /// Directory names on disk use `-` where the UI shows spaces.
    pub fn normalized_search(&self) -> String {
        self.search.as_deref().unwrap_or("").trim().replace(' ', "-").to_ascii_lowercase()
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref(), RESOURCE_DEFAULT_LIMIT)
    }

    pub fn cache_key(&self) -> String {
        let page = self.page_request();
        format!(
            "unique_directories:search={}&page={}&limit={}",
            self.normalized_search(),
            page.page,
            page.limit
        )
    }
}

fn push_directory_filter(qb: &mut QueryBuilder<'_, Sqlite>, search: &str) {
    if !search.is_empty() {
        qb.push(" WHERE LOWER(parent_directory) LIKE ")
            .push_bind(format!("%{}%", escape_like_pattern(search)))
            .push(" ESCAPE '!'");
    }
}

async fn count_directories(db: &SqlitePool, search: &str) -> AppResult<i64> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(DISTINCT parent_directory) AS cnt FROM web_crawler_resources");
    push_directory_filter(&mut qb, search);
    let row = qb.build().fetch_one(db).await.map_err(AppError::query("count directories"))?;
    row.try_get::<i64, _>("cnt").map_err(AppError::query("count directories"))
}

async fn fetch_directory_page(db: &SqlitePool, search: &str, page: PageRequest) -> AppResult<Vec<String>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT DISTINCT parent_directory FROM web_crawler_resources");
    push_directory_filter(&mut qb, search);
    qb.push(" ORDER BY parent_directory ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());
    let rows = qb.build().fetch_all(db).await.map_err(AppError::query("fetch directories"))?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("parent_directory").map_err(AppError::query("fetch directories")))
        .collect()
}

async fn fetch_members(db: &SqlitePool, directories: &[String]) -> AppResult<Vec<DirectoryMember>> {
    if directories.is_empty() {
        return Ok(Vec::new());
    }
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, parent_directory, name, google_cloud_storage_link FROM web_crawler_resources WHERE parent_directory IN (",
    );
    let mut separated = qb.separated(", ");
    for dir in directories {
        separated.push_bind(dir.clone());
    }
    separated.push_unseparated(") ORDER BY parent_directory ASC, name ASC, id ASC");

    let rows = qb.build().fetch_all(db).await.map_err(AppError::query("fetch records"))?;
    let mut members = Vec::with_capacity(rows.len());
    for row in rows {
        let id: String = row.try_get("id").map_err(AppError::query("fetch records"))?;
        members.push(DirectoryMember {
            id: parse_resource_id(&id, "fetch records")?,
            parent_directory: row.try_get("parent_directory").map_err(AppError::query("fetch records"))?,
            name: row.try_get("name").map_err(AppError::query("fetch records"))?,
            google_cloud_storage_link: row
                .try_get("google_cloud_storage_link")
                .map_err(AppError::query("fetch records"))?,
        });
    }
    Ok(members)
}

/// Groups members by their parent directory with `prefix` stripped.
///
/// Directories that are empty after stripping (including the prefix itself) are
/// dropped together with their members.
pub fn group_by_directory(members: Vec<DirectoryMember>, prefix: &str) -> BTreeMap<String, Vec<DirectoryMember>> {
    let mut grouped: BTreeMap<String, Vec<DirectoryMember>> = BTreeMap::new();
    for member in members {
        let key = member.parent_directory.strip_prefix(prefix).unwrap_or(&member.parent_directory).to_string();
        if key.is_empty() {
            continue;
        }
        grouped.entry(key).or_default().push(member);
    }
    grouped
}

/// Lists one page of distinct parent directories and their members.
pub async fn list_parent_directories(
    db: &SqlitePool,
    query: &DirectoryQuery,
    prefix: &str,
) -> AppResult<DirectoryResponse> {
    let search = query.normalized_search();
    let page = query.page_request();

    let total_records = count_directories(db, &search).await?;
    let directories = fetch_directory_page(db, &search, page).await?;
    let members = fetch_members(db, &directories).await?;
    tracing::debug!("Directory page {} holds {} directories, {} records", page.page, directories.len(), members.len());

    Ok(DirectoryResponse { data: group_by_directory(members, prefix), pagination: Pagination::new(total_records, page) })
}
