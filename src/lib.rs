//! Content filtering and reading-engagement tracking for a blog platform.
//!
//! Two components form the core: [`filter::FilterController`] narrows an
//! article list by category and free-text search while reporting settled
//! searches, and [`engagement::EngagementTracker`] tracks active reading
//! time and scroll-depth milestones for one article view at a time. Both
//! talk to collaborators through injected interfaces (an
//! [`analytics::AnalyticsSink`] for events, a [`content::ContentSource`]
//! for articles), so the core runs and tests without a browser environment.

pub mod analytics;
pub mod content;
pub mod engagement;
pub mod filter;
pub mod models;
pub mod settings;

pub use analytics::{AnalyticsSink, ConsentGate, EventStore, LogSink, NullSink};
pub use content::{ContentSource, JsonSource, StaticSource};
pub use engagement::{EngagementTracker, ReadingSnapshot, ReadingStatus};
pub use filter::{filter_articles, FilterController, FilterState, ALL_CATEGORY};
pub use models::{AnalyticsEvent, Article, ReadingSession};
pub use settings::ConsentStore;
