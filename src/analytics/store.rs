use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::models::AnalyticsEvent;

use super::sink::AnalyticsSink;

/// Sink that keeps every reported event in memory and can aggregate them
/// into a dashboard snapshot. This is the data layer behind the analytics
/// dashboard view; forwarding to a remote backend is out of scope here.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Mutex<Vec<AnalyticsEvent>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEngagement {
    pub post_id: String,
    pub reading_secs: u64,
    pub deepest_milestone: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub event_count: u64,
    pub page_views: u64,
    pub search_count: u64,
    pub top_search_terms: Vec<(String, u64)>,
    pub top_posts: Vec<(String, u64)>,
    pub top_categories: Vec<(String, u64)>,
    pub engagement: Vec<PostEngagement>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock_events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock_events().clone()
    }

    pub fn clear(&self) {
        self.lock_events().clear();
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let events = self.events();

        let mut page_views = 0u64;
        let mut search_count = 0u64;
        let mut term_counts: HashMap<String, u64> = HashMap::new();
        let mut post_views: HashMap<String, u64> = HashMap::new();
        let mut category_views: HashMap<String, u64> = HashMap::new();
        let mut reading: HashMap<String, u64> = HashMap::new();
        let mut milestones: HashMap<String, u8> = HashMap::new();

        for event in &events {
            match event.action.as_str() {
                "view_blog_post" => {
                    page_views += 1;
                    *post_views.entry(event.label.clone()).or_insert(0) += 1;
                }
                "view_content" => {
                    *category_views.entry(event.label.clone()).or_insert(0) += 1;
                }
                "search" => {
                    search_count += 1;
                    *term_counts.entry(event.label.clone()).or_insert(0) += 1;
                }
                "reading_time" => {
                    *reading.entry(event.label.clone()).or_insert(0) +=
                        event.value.max(0) as u64;
                }
                "scroll_depth" => {
                    let depth = event.value.clamp(0, 100) as u8;
                    let entry = milestones.entry(event.label.clone()).or_insert(0);
                    *entry = (*entry).max(depth);
                }
                _ => {}
            }
        }

        let mut engagement: Vec<PostEngagement> = reading
            .keys()
            .chain(milestones.keys())
            .map(|post_id| post_id.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .map(|post_id| PostEngagement {
                post_id: post_id.to_string(),
                reading_secs: reading.get(post_id).copied().unwrap_or(0),
                deepest_milestone: milestones.get(post_id).copied().unwrap_or(0),
            })
            .collect();
        engagement.sort_by(|a, b| b.reading_secs.cmp(&a.reading_secs));

        DashboardSnapshot {
            event_count: events.len() as u64,
            page_views,
            search_count,
            top_search_terms: ranked(term_counts),
            top_posts: ranked(post_views),
            top_categories: ranked(category_views),
            engagement,
        }
    }

    fn lock_events(&self) -> std::sync::MutexGuard<'_, Vec<AnalyticsEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl AnalyticsSink for EventStore {
    fn report(&self, event: AnalyticsEvent) {
        self.lock_events().push(event);
    }
}

fn ranked(counts: HashMap<String, u64>) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    // Count desc, then name for a stable order between equal counts
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::events;

    #[test]
    fn snapshot_aggregates_reported_events() {
        let store = EventStore::new();
        store.report(events::view_blog_post("1", "Building the Future with AI"));
        store.report(events::view_blog_post("1", "Building the Future with AI"));
        store.report(events::view_content("Technology"));
        store.report(events::search("react", 2));
        store.report(events::search("react", 2));
        store.report(events::search("rust", 0));
        store.report(events::reading_time("1", 120));
        store.report(events::reading_time("1", 40));
        store.report(events::scroll_depth("1", 25));
        store.report(events::scroll_depth("1", 75));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.event_count, 10);
        assert_eq!(snapshot.page_views, 2);
        assert_eq!(snapshot.search_count, 3);
        assert_eq!(snapshot.top_search_terms[0], ("react".to_string(), 2));
        assert_eq!(snapshot.top_categories[0], ("Technology".to_string(), 1));
        assert_eq!(snapshot.engagement.len(), 1);
        assert_eq!(snapshot.engagement[0].reading_secs, 160);
        assert_eq!(snapshot.engagement[0].deepest_milestone, 75);
    }

    #[test]
    fn unknown_actions_only_count_toward_totals() {
        let store = EventStore::new();
        store.report(crate::models::AnalyticsEvent::new(
            "page_navigation",
            "Journey",
            "home_to_blog",
            1,
        ));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.event_count, 1);
        assert_eq!(snapshot.page_views, 0);
        assert!(snapshot.engagement.is_empty());
    }
}
