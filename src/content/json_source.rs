use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::Article;

use super::{validate_articles, ContentSource};

/// Article collection loaded from a JSON file carrying the same shape the
/// static data file uses. Re-reads on every call so edits to the file show
/// up without a restart.
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContentSource for JsonSource {
    fn articles(&self) -> Result<Vec<Article>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read articles from {}", self.path.display()))?;
        let articles: Vec<Article> = serde_json::from_str(&contents)
            .with_context(|| format!("Malformed article data in {}", self.path.display()))?;
        validate_articles(&articles)?;
        Ok(articles)
    }
}
