use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrivacySettings {
    analytics_consent: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        // Consent is opt-in: no events leave the process until granted.
        Self {
            analytics_consent: false,
        }
    }
}

/// File-backed store for the reader's analytics consent decision.
pub struct ConsentStore {
    path: PathBuf,
    data: RwLock<PrivacySettings>,
}

impl ConsentStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            PrivacySettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn analytics_consent(&self) -> bool {
        self.read_data().analytics_consent
    }

    pub fn set_analytics_consent(&self, consent: bool) -> Result<()> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.analytics_consent = consent;
        self.persist(&guard)
    }

    fn read_data(&self) -> PrivacySettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn persist(&self, data: &PrivacySettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
