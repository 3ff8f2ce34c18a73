use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ReadingStatus {
    Idle,
    Active,
    Paused,
    Closed,
}

impl Default for ReadingStatus {
    fn default() -> Self {
        ReadingStatus::Idle
    }
}

/// Per-view reading state. Active time is tracked as a baseline accumulated
/// over earlier visible windows plus the anchor of the current one, so time
/// spent hidden is never counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingState {
    pub status: ReadingStatus,
    pub session_id: Option<String>,
    pub post_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub active_secs: u64,
    pub last_milestone: u8,
    pub scroll_percentage: u8,
    #[serde(skip)]
    active_baseline: Duration,
    #[serde(skip)]
    active_anchor: Option<Instant>,
    #[serde(skip)]
    last_scroll_signal: Option<Instant>,
}

impl Default for ReadingState {
    fn default() -> Self {
        Self {
            status: ReadingStatus::Idle,
            session_id: None,
            post_id: None,
            started_at: None,
            active_secs: 0,
            last_milestone: 0,
            scroll_percentage: 0,
            active_baseline: Duration::ZERO,
            active_anchor: None,
            last_scroll_signal: None,
        }
    }
}

impl ReadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(
        &mut self,
        session_id: String,
        post_id: String,
        page_visible: bool,
        start_at: DateTime<Utc>,
        now: Instant,
    ) {
        *self = Self {
            status: if page_visible {
                ReadingStatus::Active
            } else {
                ReadingStatus::Paused
            },
            session_id: Some(session_id),
            post_id: Some(post_id),
            started_at: Some(start_at),
            active_secs: 0,
            last_milestone: 0,
            scroll_percentage: 0,
            active_baseline: Duration::ZERO,
            active_anchor: page_visible.then_some(now),
            last_scroll_signal: None,
        };
    }

    pub fn current_active(&self, now: Instant) -> Duration {
        match (self.status, self.active_anchor) {
            (ReadingStatus::Active, Some(anchor)) => {
                self.active_baseline
                    .saturating_add(now.saturating_duration_since(anchor))
            }
            _ => self.active_baseline,
        }
    }

    pub fn sync_active_secs(&mut self, now: Instant) {
        self.active_secs = self.current_active(now).as_secs();
    }

    /// Page went hidden: fold the current window into the baseline and stop
    /// accruing. Later ticks and scroll signals see the frozen state.
    pub fn pause(&mut self, now: Instant) {
        if self.status != ReadingStatus::Active {
            return;
        }
        if let Some(anchor) = self.active_anchor.take() {
            self.active_baseline = self
                .active_baseline
                .saturating_add(now.saturating_duration_since(anchor));
        }
        self.status = ReadingStatus::Paused;
        self.sync_active_secs(now);
    }

    /// Page became visible again: restart the clock reference at `now`.
    pub fn resume(&mut self, now: Instant) {
        if self.status != ReadingStatus::Paused {
            return;
        }
        self.active_anchor = Some(now);
        self.status = ReadingStatus::Active;
    }

    /// Terminal transition. Returns the total active seconds for the flush.
    pub fn close(&mut self, now: Instant) -> u64 {
        if let Some(anchor) = self.active_anchor.take() {
            self.active_baseline = self
                .active_baseline
                .saturating_add(now.saturating_duration_since(anchor));
        }
        self.status = ReadingStatus::Closed;
        self.sync_active_secs(now);
        self.active_secs
    }

    /// Throttle gate for scroll signals: true when enough time has passed
    /// since the last processed one. Updates the watermark on success.
    pub fn admit_scroll_signal(&mut self, now: Instant, min_interval: Duration) -> bool {
        let admitted = self
            .last_scroll_signal
            .map(|last| now.saturating_duration_since(last) >= min_interval)
            .unwrap_or(true);
        if admitted {
            self.last_scroll_signal = Some(now);
        }
        admitted
    }
}
