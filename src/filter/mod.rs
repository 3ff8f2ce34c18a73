pub mod controller;
pub mod engine;

pub use controller::{FilterController, FilterState};
pub use engine::{category_counts, filter_articles, ALL_CATEGORY};
