use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use chrono::Utc;
use log::info;
use serde::Serialize;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::analytics::{events, AnalyticsSink};
use crate::models::ReadingSession;

use super::format::format_reading_time;
use super::scroll::{next_milestone, scroll_percentage};
use super::state::{ReadingState, ReadingStatus};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Live view of the session for a progress display, published on every tick
/// and on every state transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSnapshot {
    pub post_id: String,
    pub reading_secs: u64,
    pub formatted_reading_time: String,
    pub scroll_percentage: u8,
    pub status: ReadingStatus,
}

impl Default for ReadingSnapshot {
    fn default() -> Self {
        Self {
            post_id: String::new(),
            reading_secs: 0,
            formatted_reading_time: format_reading_time(0),
            scroll_percentage: 0,
            status: ReadingStatus::Idle,
        }
    }
}

fn snapshot_of(state: &ReadingState) -> ReadingSnapshot {
    ReadingSnapshot {
        post_id: state.post_id.clone().unwrap_or_default(),
        reading_secs: state.active_secs,
        formatted_reading_time: format_reading_time(state.active_secs),
        scroll_percentage: state.scroll_percentage,
        status: state.status,
    }
}

/// Tracks one article view at a time: active reading seconds (frozen while
/// the page is hidden) and scroll-depth milestones, flushed to the analytics
/// sink exactly once when the view is torn down.
#[derive(Clone)]
pub struct EngagementTracker {
    state: Arc<Mutex<ReadingState>>,
    sink: Arc<dyn AnalyticsSink>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    cancel: Arc<Mutex<Option<CancellationToken>>>,
    snapshot_tx: Arc<watch::Sender<ReadingSnapshot>>,
}

impl EngagementTracker {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        let (snapshot_tx, _) = watch::channel(ReadingSnapshot::default());

        Self {
            state: Arc::new(Mutex::new(ReadingState::new())),
            sink,
            ticker: Arc::new(Mutex::new(None)),
            cancel: Arc::new(Mutex::new(None)),
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    /// Start a session for an article view. A tracker whose previous session
    /// was closed can be reused; the new view gets a fresh session with no
    /// state carried over.
    pub async fn open(&self, post_id: &str, page_visible: bool) -> Result<ReadingSnapshot> {
        {
            let mut state = self.state.lock().await;
            if matches!(state.status, ReadingStatus::Active | ReadingStatus::Paused) {
                bail!("a reading session is already active");
            }
            state.begin(
                Uuid::new_v4().to_string(),
                post_id.to_string(),
                page_visible,
                Utc::now(),
                Instant::now(),
            );
            self.publish(&state);
        }

        self.spawn_ticker().await;
        Ok(self.snapshot())
    }

    pub fn subscribe(&self) -> watch::Receiver<ReadingSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> ReadingSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Page-visibility signal. Hidden freezes accrual before any later tick
    /// or scroll signal is processed; visible restarts the clock reference
    /// at now, so time spent hidden is never counted.
    pub async fn set_visibility(&self, visible: bool) {
        let mut state = self.state.lock().await;
        if matches!(state.status, ReadingStatus::Idle | ReadingStatus::Closed) {
            return;
        }

        let now = Instant::now();
        if visible {
            state.resume(now);
        } else {
            state.pause(now);
        }
        state.sync_active_secs(now);
        self.publish(&state);
    }

    /// Throttled scroll signal. Ignored while the page is hidden or the view
    /// is torn down. Reports at most one newly crossed milestone.
    pub async fn record_scroll(&self, scroll_top: f64, content_height: f64, viewport_height: f64) {
        let mut state = self.state.lock().await;
        if state.status != ReadingStatus::Active {
            return;
        }

        let now = Instant::now();
        if !state.admit_scroll_signal(now, SCROLL_THROTTLE) {
            return;
        }

        let Some(percentage) = scroll_percentage(scroll_top, content_height, viewport_height)
        else {
            return;
        };

        state.scroll_percentage = percentage;
        if let Some(milestone) = next_milestone(percentage, state.last_milestone) {
            state.last_milestone = milestone;
            if let Some(post_id) = state.post_id.clone() {
                self.sink.report(events::scroll_depth(&post_id, milestone));
            }
        }
        self.publish(&state);
    }

    /// Tear the view down: stop the ticker, release the session, and flush
    /// `reading_time` when any active time accumulated. Idempotent: the
    /// unmount and unload paths can both call this without double-reporting.
    pub async fn close(&self) -> Option<ReadingSession> {
        let session = {
            let mut state = self.state.lock().await;
            if matches!(state.status, ReadingStatus::Idle | ReadingStatus::Closed) {
                return None;
            }

            let active_secs = state.close(Instant::now());
            self.publish(&state);

            match (&state.session_id, &state.post_id, state.started_at) {
                (Some(id), Some(post_id), Some(started_at)) => ReadingSession {
                    id: id.clone(),
                    post_id: post_id.clone(),
                    started_at,
                    ended_at: Utc::now(),
                    active_secs,
                    last_milestone: state.last_milestone,
                },
                _ => return None,
            }
        };

        if let Some(token) = self.cancel.lock().await.take() {
            token.cancel();
        }
        if let Some(handle) = self.ticker.lock().await.take() {
            let _ = handle.await;
        }

        if session.active_secs > 0 {
            self.sink
                .report(events::reading_time(&session.post_id, session.active_secs));
        }

        info!(
            "reading session {} closed after {}s (deepest milestone {}%)",
            session.id, session.active_secs, session.last_milestone
        );
        Some(session)
    }

    async fn spawn_ticker(&self) {
        let token = CancellationToken::new();
        {
            let mut cancel_guard = self.cancel.lock().await;
            if let Some(old) = cancel_guard.take() {
                old.cancel();
            }
            *cancel_guard = Some(token.clone());
        }

        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let snapshot_tx = self.snapshot_tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick resolves immediately; skip it
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let mut guard = state.lock().await;
                        if guard.status == ReadingStatus::Closed {
                            break;
                        }
                        guard.sync_active_secs(Instant::now());
                        snapshot_tx.send_replace(snapshot_of(&guard));
                    }
                    _ = token.cancelled() => break,
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    // send_replace keeps the latest snapshot available to `snapshot()` even
    // when no receiver is currently subscribed.
    fn publish(&self, state: &ReadingState) {
        self.snapshot_tx.send_replace(snapshot_of(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::EventStore;
    use crate::models::AnalyticsEvent;

    fn tracker_with_recorder() -> (EngagementTracker, Arc<EventStore>) {
        let _ = env_logger::builder().is_test(true).try_init();
        let recorder = Arc::new(EventStore::new());
        let tracker = EngagementTracker::new(recorder.clone() as Arc<dyn AnalyticsSink>);
        (tracker, recorder)
    }

    fn actions(events: &[AnalyticsEvent]) -> Vec<&str> {
        events.iter().map(|e| e.action.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn hidden_time_is_excluded_from_the_final_report() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        time::sleep(Duration::from_secs(5)).await;
        tracker.set_visibility(false).await;
        time::sleep(Duration::from_secs(10)).await;
        tracker.set_visibility(true).await;
        time::sleep(Duration::from_secs(5)).await;

        let session = tracker.close().await.unwrap();
        assert_eq!(session.active_secs, 10);

        let events = recorder.events();
        assert_eq!(actions(&events), vec!["reading_time"]);
        assert_eq!(events[0].value, 10);
        assert_eq!(events[0].label, "post-1");
    }

    #[tokio::test(start_paused = true)]
    async fn close_is_idempotent_across_unmount_and_unload() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();
        time::sleep(Duration::from_secs(3)).await;

        let first = tracker.close().await;
        let second = tracker.close().await;

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(actions(&recorder.events()), vec!["reading_time"]);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_second_session_is_not_reported() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        let session = tracker.close().await.unwrap();
        assert_eq!(session.active_secs, 0);
        assert!(recorder.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn no_timers_survive_a_closed_session() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();
        time::sleep(Duration::from_secs(2)).await;
        tracker.close().await.unwrap();

        let before = tracker.snapshot();
        time::sleep(Duration::from_secs(120)).await;
        let after = tracker.snapshot();

        assert_eq!(before.reading_secs, after.reading_secs);
        assert_eq!(after.status, ReadingStatus::Closed);
        assert_eq!(recorder.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn milestones_are_monotone_and_never_repeat() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        // content 3000px, viewport 800px: scrollable range 2200px
        tracker.record_scroll(660.0, 3000.0, 800.0).await; // 30%
        time::sleep(Duration::from_millis(150)).await;
        tracker.record_scroll(1210.0, 3000.0, 800.0).await; // 55%
        time::sleep(Duration::from_millis(150)).await;
        tracker.record_scroll(110.0, 3000.0, 800.0).await; // back up to 5%
        time::sleep(Duration::from_millis(150)).await;
        tracker.record_scroll(1210.0, 3000.0, 800.0).await; // 55% again

        let milestones: Vec<i64> = recorder
            .events()
            .iter()
            .filter(|e| e.action == "scroll_depth")
            .map(|e| e.value)
            .collect();
        assert_eq!(milestones, vec![25, 50]);
    }

    #[tokio::test(start_paused = true)]
    async fn a_jump_reports_one_milestone_per_processed_signal() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        tracker.record_scroll(1980.0, 3000.0, 800.0).await; // 90%
        time::sleep(Duration::from_millis(150)).await;
        tracker.record_scroll(1980.0, 3000.0, 800.0).await;

        let milestones: Vec<i64> = recorder
            .events()
            .iter()
            .filter(|e| e.action == "scroll_depth")
            .map(|e| e.value)
            .collect();
        assert_eq!(milestones, vec![25, 50]);
    }

    #[tokio::test(start_paused = true)]
    async fn scroll_signals_inside_the_throttle_window_are_dropped() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        tracker.record_scroll(660.0, 3000.0, 800.0).await; // 30% -> 25
        tracker.record_scroll(1210.0, 3000.0, 800.0).await; // same instant, dropped

        let events = recorder.events();
        assert_eq!(actions(&events), vec!["scroll_depth"]);
        assert_eq!(events[0].value, 25);
        assert_eq!(tracker.snapshot().scroll_percentage, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn scrolling_while_hidden_is_ignored() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();
        tracker.set_visibility(false).await;

        tracker.record_scroll(2200.0, 3000.0, 800.0).await;

        assert!(recorder.is_empty());
        assert_eq!(tracker.snapshot().scroll_percentage, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn short_content_disables_milestone_tracking() {
        let (tracker, recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        tracker.record_scroll(0.0, 600.0, 800.0).await;

        assert!(recorder.is_empty());
        assert_eq!(tracker.snapshot().scroll_percentage, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_publishes_live_snapshots() {
        let (tracker, _recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();

        time::sleep(Duration::from_millis(3500)).await;

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.reading_secs, 3);
        assert_eq!(snapshot.formatted_reading_time, "0:03");
        assert_eq!(snapshot.status, ReadingStatus::Active);
    }

    #[tokio::test(start_paused = true)]
    async fn opening_while_active_is_rejected_but_reuse_after_close_works() {
        let (tracker, _recorder) = tracker_with_recorder();
        tracker.open("post-1", true).await.unwrap();
        assert!(tracker.open("post-2", true).await.is_err());

        time::sleep(Duration::from_secs(1)).await;
        tracker.close().await.unwrap();

        let snapshot = tracker.open("post-2", true).await.unwrap();
        assert_eq!(snapshot.post_id, "post-2");
        assert_eq!(snapshot.reading_secs, 0);
        assert_eq!(snapshot.scroll_percentage, 0);
    }
}
