//! Constructors for the blog event vocabulary.
//!
//! The filtering and engagement components emit `search`, `filter_category`,
//! `scroll_depth` and `reading_time` themselves; the rest are built by the
//! embedding host (post views, shares, newsletter signups) and funneled
//! through the same sink.

use crate::models::AnalyticsEvent;

pub fn view_blog_post(post_id: &str, post_title: &str) -> AnalyticsEvent {
    AnalyticsEvent::new(
        "view_blog_post",
        "Blog",
        format!("{post_title} ({post_id})"),
        1,
    )
}

pub fn view_content(category: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("view_content", "Blog", category, 1)
}

pub fn reading_time(post_id: &str, seconds: u64) -> AnalyticsEvent {
    AnalyticsEvent::new("reading_time", "Blog", post_id, seconds as i64)
}

pub fn scroll_depth(post_id: &str, milestone: u8) -> AnalyticsEvent {
    AnalyticsEvent::new("scroll_depth", "Blog", post_id, i64::from(milestone))
}

pub fn search(term: &str, results_count: usize) -> AnalyticsEvent {
    AnalyticsEvent::new("search", "Blog", term, results_count as i64)
}

pub fn category_filter(category: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("filter_category", "Blog", category, 1)
}

pub fn share(post_id: &str, platform: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("share", "Social", format!("{post_id}_{platform}"), 1)
}

pub fn newsletter_signup(source: &str) -> AnalyticsEvent {
    AnalyticsEvent::new("newsletter_signup", "Engagement", source, 1)
}
