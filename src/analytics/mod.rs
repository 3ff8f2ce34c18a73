pub mod consent;
pub mod events;
pub mod sink;
pub mod store;

pub use consent::ConsentGate;
pub use sink::{AnalyticsSink, LogSink, NullSink};
pub use store::{DashboardSnapshot, EventStore, PostEngagement};
