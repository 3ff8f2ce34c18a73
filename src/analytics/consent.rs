use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::models::AnalyticsEvent;
use crate::settings::ConsentStore;

use super::sink::AnalyticsSink;

/// Sink wrapper that forwards events only while the reader has granted
/// analytics consent. Events reported without consent are dropped, not
/// queued.
pub struct ConsentGate {
    store: Arc<ConsentStore>,
    inner: Arc<dyn AnalyticsSink>,
}

impl ConsentGate {
    pub fn new(store: Arc<ConsentStore>, inner: Arc<dyn AnalyticsSink>) -> Self {
        Self { store, inner }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.analytics_consent()
    }

    pub fn grant(&self) -> Result<()> {
        self.store.set_analytics_consent(true)?;
        info!("analytics consent granted");
        Ok(())
    }

    pub fn revoke(&self) -> Result<()> {
        self.store.set_analytics_consent(false)?;
        info!("analytics consent revoked");
        Ok(())
    }
}

impl AnalyticsSink for ConsentGate {
    fn report(&self, event: AnalyticsEvent) {
        if self.store.analytics_consent() {
            self.inner.report(event);
        }
    }
}
