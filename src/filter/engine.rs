use crate::models::Article;

/// Sentinel category meaning "no category restriction".
pub const ALL_CATEGORY: &str = "All";

/// Produce the subset of `articles` matching the selected category and the
/// free-text search term, preserving input order. Pure: the input collection
/// is never mutated and the result is a fresh sequence.
///
/// Category matching is an exact, case-sensitive comparison unless the
/// sentinel [`ALL_CATEGORY`] is selected. The term matches case-insensitively
/// against title, excerpt, or any tag; a blank term applies no search filter.
pub fn filter_articles(articles: &[Article], category: &str, term: &str) -> Vec<Article> {
    let term = term.trim().to_lowercase();

    articles
        .iter()
        .filter(|post| category == ALL_CATEGORY || post.category == category)
        .filter(|post| term.is_empty() || matches_term(post, &term))
        .cloned()
        .collect()
}

// `term` must already be trimmed and lowercased.
fn matches_term(post: &Article, term: &str) -> bool {
    post.title.to_lowercase().contains(term)
        || post.excerpt.to_lowercase().contains(term)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

/// Distinct categories with their article counts, [`ALL_CATEGORY`] first
/// with the total. Categories keep first-appearance order so a filter UI
/// stays stable as counts change.
pub fn category_counts(articles: &[Article]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = vec![(ALL_CATEGORY.to_string(), articles.len())];

    for article in articles {
        match counts[1..]
            .iter()
            .position(|(name, _)| name == &article.category)
        {
            Some(idx) => counts[idx + 1].1 += 1,
            None => counts.push((article.category.clone(), 1)),
        }
    }

    counts
}
