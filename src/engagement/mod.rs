pub mod format;
pub mod scroll;
pub mod state;
pub mod tracker;

pub use format::format_reading_time;
pub use scroll::{next_milestone, scroll_percentage, MILESTONES};
pub use state::{ReadingState, ReadingStatus};
pub use tracker::{EngagementTracker, ReadingSnapshot};
