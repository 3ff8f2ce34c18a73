use std::{sync::Arc, time::Duration};

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::{sync::Mutex, task::JoinHandle, time};

use crate::analytics::{events, AnalyticsSink};
use crate::models::Article;

use super::engine::{filter_articles, ALL_CATEGORY};

/// How long a search term must stay unchanged before it is reported. While
/// the reader is still typing, nothing is emitted.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub selected_category: String,
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_category: ALL_CATEGORY.to_string(),
            search_term: String::new(),
        }
    }
}

/// Drives category/search filtering for one article list view and emits the
/// matching analytics events: `filter_category` synchronously on selection,
/// `search` after the term has settled for [`SEARCH_DEBOUNCE`].
#[derive(Clone)]
pub struct FilterController {
    articles: Arc<Vec<Article>>,
    state: Arc<Mutex<FilterState>>,
    sink: Arc<dyn AnalyticsSink>,
    pending_search: Arc<Mutex<Option<JoinHandle<()>>>>,
    debounce_window: Duration,
}

impl FilterController {
    pub fn new(articles: Vec<Article>, sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            articles: Arc::new(articles),
            state: Arc::new(Mutex::new(FilterState::default())),
            sink,
            pending_search: Arc::new(Mutex::new(None)),
            debounce_window: SEARCH_DEBOUNCE,
        }
    }

    pub async fn state(&self) -> FilterState {
        self.state.lock().await.clone()
    }

    /// Current filtered view of the article list.
    pub async fn results(&self) -> Vec<Article> {
        let state = self.state.lock().await;
        filter_articles(&self.articles, &state.selected_category, &state.search_term)
    }

    /// Select a category and return the narrowed list. Any non-sentinel
    /// selection is reported immediately; there is nothing to debounce since
    /// a click is already a settled choice.
    pub async fn set_category(&self, category: &str) -> Vec<Article> {
        let results = {
            let mut state = self.state.lock().await;
            state.selected_category = category.to_string();
            filter_articles(&self.articles, &state.selected_category, &state.search_term)
        };

        if category != ALL_CATEGORY {
            self.sink.report(events::category_filter(category));
        }

        results
    }

    /// Update the search term and return the narrowed list. Reporting is
    /// deferred: a pending report for a term the reader typed past is
    /// cancelled, and only a term that survives the debounce window is sent,
    /// with the match count it had when it settled.
    pub async fn set_search_term(&self, term: &str) -> Vec<Article> {
        let results = {
            let mut state = self.state.lock().await;
            state.search_term = term.to_string();
            filter_articles(&self.articles, &state.selected_category, &state.search_term)
        };

        let mut pending = self.pending_search.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if !term.trim().is_empty() {
            let sink = self.sink.clone();
            let term = term.to_string();
            let count = results.len();
            let window = self.debounce_window;

            *pending = Some(tokio::spawn(async move {
                time::sleep(window).await;
                debug!("search term settled: '{}' ({} results)", term, count);
                sink.report(events::search(&term, count));
            }));
        }

        results
    }

    /// Tear down the controller. A search report still in its debounce
    /// window is cancelled: the reader never settled on that term.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.pending_search.lock().await.take() {
            handle.abort();
        }
    }
}
