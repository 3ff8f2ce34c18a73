use log::{debug, info};

use crate::models::AnalyticsEvent;

/// Destination for engagement events. Delivery is fire-and-forget: a sink
/// must swallow its own failures, and a broken sink must never interrupt
/// reading or navigation.
pub trait AnalyticsSink: Send + Sync {
    fn report(&self, event: AnalyticsEvent);
}

/// Sink that writes each event to the log. Useful as the default wiring
/// while a real forwarding backend is not configured.
#[derive(Debug, Default)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn report(&self, event: AnalyticsEvent) {
        info!(
            "analytics event: {} [{}] label={} value={}",
            event.action, event.category, event.label, event.value
        );
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl AnalyticsSink for NullSink {
    fn report(&self, event: AnalyticsEvent) {
        debug!("analytics event dropped: {}", event.action);
    }
}
