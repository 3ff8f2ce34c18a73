use serde::{Deserialize, Serialize};

/// One discrete analytics event in the `(action, category, label, value)`
/// shape the downstream sink expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    pub value: i64,
}

impl AnalyticsEvent {
    pub fn new(
        action: impl Into<String>,
        category: impl Into<String>,
        label: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            action: action.into(),
            category: category.into(),
            label: label.into(),
            value,
        }
    }
}
