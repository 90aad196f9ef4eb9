//! Resource search with progressive relaxation.
//!
//! Up to four free-text slots (`q1`..`q4`) are each turned into a substring
//! filter over six text columns. When the combined filter matches nothing the
//! last remaining parameter is dropped and the count is retried, until rows are
//! found or no parameters are left, in which case the unfiltered table is used.

use regex::Regex;
use serde::Deserialize;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    pagination::{PageRequest, Pagination, RESOURCE_DEFAULT_LIMIT},
    types::{ResourceSummary, SearchResponse},
};

/// Query slots in priority order. Relaxation drops from the end.
pub const SEARCH_SLOTS: [&str; 4] = ["q1", "q2", "q3", "q4"];

const SEARCHABLE_COLUMNS: [&str; 6] = [
    "name",
    "parent_directory",
    "google_drive_download_link",
    "relative_path",
    "extracted_content",
    "google_cloud_storage_link",
];

const LIKE_ESCAPE: char = '!';

lazy_static::lazy_static! {
    static ref FORM_DIGITS: Regex = Regex::new(r"(?i)form(\d+)").expect("static regex");
    static ref GRADE_DIGITS: Regex = Regex::new(r"(?i)grade(\d+)").expect("static regex");
}

/// Query string of `GET /v1/api/resources/`.
///
/// Pagination values stay raw strings so malformed input falls back to the
/// defaults instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    #[serde(default)]
    pub q1: Option<String>,
    #[serde(default)]
    pub q2: Option<String>,
    #[serde(default)]
    pub q3: Option<String>,
    #[serde(default)]
    pub q4: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// A normalized, non-empty search parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    pub slot: &'static str,
    pub value: String,
}

/// Result of [`search_resources`] plus the number of count queries spent relaxing.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub response: SearchResponse,
    pub attempts: usize,
}

impl ResourceQuery {
    fn slots(&self) -> [(&'static str, Option<&str>); 4] {
        [
            (SEARCH_SLOTS[0], self.q1.as_deref()),
            (SEARCH_SLOTS[1], self.q2.as_deref()),
            (SEARCH_SLOTS[2], self.q3.as_deref()),
            (SEARCH_SLOTS[3], self.q4.as_deref()),
        ]
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref(), self.limit.as_deref(), RESOURCE_DEFAULT_LIMIT)
    }

    /// Non-empty slots in priority order, trimmed and lower-cased. `q1` also gets
    /// the grade/form spacing fix.
    ///
    /// Only ASCII letters are folded, the same as SQLite's `LOWER` and `LIKE`, so
    /// a term and the column it is matched against always fold alike.
    pub fn terms(&self) -> Vec<SearchTerm> {
        self.slots()
            .into_iter()
            .filter_map(|(slot, raw)| {
                let trimmed = raw?.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let mut value = trimmed.to_ascii_lowercase();
                if slot == SEARCH_SLOTS[0] {
                    value = normalize_level_keyword(&value);
                }
                Some(SearchTerm { slot, value })
            })
            .collect()
    }

    /// Cache key over every slot (empty ones included) and the effective page/limit.
    pub fn cache_key(&self) -> String {
        let page = self.page_request();
        let mut key = String::from("resources:");
        for (slot, raw) in self.slots() {
            key.push_str(slot);
            key.push('=');
            key.push_str(raw.unwrap_or(""));
            key.push('&');
        }
        key.push_str(&format!("page={}&limit={}", page.page, page.limit));
        key
    }
}

/// Inserts a space between a `form`/`grade` keyword and a directly following
/// number: `grade9` becomes `grade 9`.
pub fn normalize_level_keyword(input: &str) -> String {
    let spaced = FORM_DIGITS.replace_all(input, "form ${1}");
    GRADE_DIGITS.replace_all(&spaced, "grade ${1}").into_owned()
}

pub(crate) fn escape_like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

// Each term matches if any column contains it; terms are ANDed.
fn push_term_filters(qb: &mut QueryBuilder<'_, Sqlite>, terms: &[SearchTerm]) {
    for (i, term) in terms.iter().enumerate() {
        qb.push(if i == 0 { " WHERE (" } else { " AND (" });
        let pattern = format!("%{}%", escape_like_pattern(&term.value));
        for (j, column) in SEARCHABLE_COLUMNS.iter().enumerate() {
            if j > 0 {
                qb.push(" OR ");
            }
            qb.push("LOWER(")
                .push(*column)
                .push(") LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '!'");
        }
        qb.push(")");
    }
}

async fn count_matching(db: &SqlitePool, terms: &[SearchTerm]) -> AppResult<i64> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) AS cnt FROM web_crawler_resources");
    push_term_filters(&mut qb, terms);
    let row = qb.build().fetch_one(db).await.map_err(AppError::query("count resources"))?;
    row.try_get::<i64, _>("cnt").map_err(AppError::query("count resources"))
}

/// Picks the longest prefix of `terms` that matches at least one row.
///
/// Returns the chosen prefix (empty for the unfiltered fallback), its row count
/// and the number of filtered count queries issued.
async fn relax_terms<'t>(db: &SqlitePool, terms: &'t [SearchTerm]) -> AppResult<(&'t [SearchTerm], i64, usize)> {
    let mut attempts = 0;
    for n in (1..=terms.len()).rev() {
        let subset = &terms[..n];
        attempts += 1;
        let count = count_matching(db, subset).await?;
        if count > 0 {
            tracing::debug!("Search matched {} rows with {} parameter(s)", count, n);
            return Ok((subset, count, attempts));
        }
        tracing::debug!("No rows for {} parameter(s), dropping {}", n, subset[n - 1].slot);
    }
    if !terms.is_empty() {
        tracing::debug!("No parameter combination matched, falling back to all resources");
    }
    let total = count_matching(db, &[]).await?;
    Ok((&[], total, attempts))
}

/// Parses a stored resource id; a malformed one fails the surrounding `action`.
pub(crate) fn parse_resource_id(raw: &str, action: &'static str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::Query { action, details: format!("invalid resource id {:?}: {}", raw, e) })
}

fn summary_from_row(row: &SqliteRow) -> AppResult<ResourceSummary> {
    const ACTION: &str = "fetch resources";
    let id: String = row.try_get("id").map_err(AppError::query(ACTION))?;
    Ok(ResourceSummary {
        id: parse_resource_id(&id, ACTION)?,
        name: row.try_get("name").map_err(AppError::query(ACTION))?,
        django_relative_path: row.try_get("django_relative_path").map_err(AppError::query(ACTION))?,
        google_cloud_storage_link: row.try_get("google_cloud_storage_link").map_err(AppError::query(ACTION))?,
        created_at: row.try_get("created_at").map_err(AppError::query(ACTION))?,
    })
}

async fn fetch_page(db: &SqlitePool, terms: &[SearchTerm], page: PageRequest) -> AppResult<Vec<ResourceSummary>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, name, django_relative_path, google_cloud_storage_link, created_at FROM web_crawler_resources",
    );
    push_term_filters(&mut qb, terms);
    qb.push(" ORDER BY created_at DESC, id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());

    let rows = qb.build().fetch_all(db).await.map_err(AppError::query("fetch resources"))?;
    rows.iter().map(summary_from_row).collect()
}

/// Runs a relaxed search and builds the `{data, pagination, parameters_used}` payload.
pub async fn search_resources(db: &SqlitePool, query: &ResourceQuery) -> AppResult<SearchOutcome> {
    let page = query.page_request();
    let terms = query.terms();

    let (applied, total_records, attempts) = relax_terms(db, &terms).await?;
    let data = fetch_page(db, applied, page).await?;

    Ok(SearchOutcome {
        response: SearchResponse {
            data,
            pagination: Pagination::new(total_records, page),
            parameters_used: applied.iter().map(|t| t.slot.to_string()).collect(),
        },
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q1: &str, q2: &str, q3: &str, q4: &str) -> ResourceQuery {
        let opt = |v: &str| Some(v.to_string());
        ResourceQuery { q1: opt(q1), q2: opt(q2), q3: opt(q3), q4: opt(q4), page: None, limit: None }
    }

    #[test]
    fn test_normalize_inserts_space() {
        assert_eq!(normalize_level_keyword("grade9"), "grade 9");
        assert_eq!(normalize_level_keyword("form4 maths"), "form 4 maths");
        assert_eq!(normalize_level_keyword("grade10 and form2"), "grade 10 and form 2");
    }

    #[test]
    fn test_normalize_leaves_spaced_input() {
        assert_eq!(normalize_level_keyword("grade 9"), "grade 9");
        assert_eq!(normalize_level_keyword("mathematics"), "mathematics");
    }

    #[test]
    fn test_terms_skip_empty_slots() {
        let q = query("", "  ", "Biology", "");
        let terms = q.terms();
        assert_eq!(terms, vec![SearchTerm { slot: "q3", value: "biology".to_string() }]);
    }

    #[test]
    fn test_only_first_slot_is_normalized() {
        let q = query("Grade9", "grade9", "", "");
        let terms = q.terms();
        assert_eq!(terms[0].value, "grade 9");
        assert_eq!(terms[1].value, "grade9");
    }

    #[test]
    fn test_cache_key_includes_empty_slots() {
        let key = ResourceQuery::default().cache_key();
        assert_eq!(key, "resources:q1=&q2=&q3=&q4=&page=1&limit=100");
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let a = query("grade 9", "", "math", "");
        let b = query("grade 9", "", "math", "");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), query("grade 9", "math", "", "").cache_key());
    }

    #[test]
    fn test_cache_key_uses_effective_pagination() {
        let mut a = ResourceQuery::default();
        a.page = Some("junk".to_string());
        let mut b = ResourceQuery::default();
        b.page = Some("1".to_string());
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("50%_off!"), "50!%!_off!!");
    }
}
