use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A published blog post as supplied by the content source. Immutable from
/// the filter engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub published_at: NaiveDate,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
}
