use anyhow::Result;

use crate::models::Article;

use super::{validate_articles, ContentSource};

/// In-memory article collection, for bundled content or tests.
pub struct StaticSource {
    articles: Vec<Article>,
}

impl StaticSource {
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        validate_articles(&articles)?;
        Ok(Self { articles })
    }
}

impl ContentSource for StaticSource {
    fn articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }
}
