use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The flushed record of one article view, produced exactly once when the
/// view is torn down.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSession {
    pub id: String,
    pub post_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub active_secs: u64,
    /// Deepest scroll milestone reached, 0 when none was crossed.
    pub last_milestone: u8,
}
