use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pagination::Pagination;

// Search result item. `extracted_content` is searchable but never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: Uuid,
    pub name: String,
    pub django_relative_path: String,
    pub google_cloud_storage_link: String,
    pub created_at: DateTime<Utc>,
}

// Projection used by the directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryMember {
    pub id: Uuid,
    pub parent_directory: String,
    pub name: String,
    pub google_cloud_storage_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<ResourceSummary>,
    pub pagination: Pagination,
    /// Names of the query slots whose filters produced `data`, in slot order.
    /// Empty slots are never listed, even when they sit between applied ones,
    /// so `q1` alone reports `["q1"]`. Empty after a fallback to all rows.
    pub parameters_used: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub data: BTreeMap<String, Vec<DirectoryMember>>,
    pub pagination: Pagination,
}

/// Everything the response cache can hold. Serialized untagged, so a cached
/// payload renders exactly like the freshly computed one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CachedPayload {
    Resources(SearchResponse),
    Directories(DirectoryResponse),
}

impl From<SearchResponse> for CachedPayload {
    fn from(value: SearchResponse) -> Self {
        CachedPayload::Resources(value)
    }
}

impl From<DirectoryResponse> for CachedPayload {
    fn from(value: DirectoryResponse) -> Self {
        CachedPayload::Directories(value)
    }
}
