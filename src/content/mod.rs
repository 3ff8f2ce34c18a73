mod json_source;
mod static_source;

use anyhow::{bail, Result};

use crate::models::Article;

pub use json_source::JsonSource;
pub use static_source::StaticSource;

/// Supplier of the immutable article collection. The filter engine is
/// agnostic to where the articles come from.
pub trait ContentSource {
    fn articles(&self) -> Result<Vec<Article>>;
}

/// Reject articles a well-formed content source could never produce.
/// Malformed entries are a defect in the source, so this fails fast instead
/// of skipping them.
pub fn validate_articles(articles: &[Article]) -> Result<()> {
    for article in articles {
        if article.slug.trim().is_empty() {
            bail!("article {} has an empty slug", article.id);
        }
        if article.title.trim().is_empty() {
            bail!("article {} ({}) has an empty title", article.id, article.slug);
        }
        if article.category.trim().is_empty() {
            bail!(
                "article {} ({}) has an empty category",
                article.id,
                article.slug
            );
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::article;
    use super::*;

    #[test]
    fn valid_articles_pass() {
        let articles = vec![article(1, "Intro to AI", "Technology", &["ai"])];
        assert!(validate_articles(&articles).is_ok());
    }

    #[test]
    fn blank_category_is_rejected() {
        let mut bad = article(7, "Untitled Draft", "Technology", &[]);
        bad.category = "  ".to_string();
        let err = validate_articles(&[bad]).unwrap_err();
        assert!(err.to_string().contains("empty category"));
    }
}
