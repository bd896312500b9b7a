//! Article catalog
//!
//! Read-only view over the article entity store, seeded from a JSONL file
//! at startup. This core never mutates articles; it resolves slugs for the
//! event classifier, enriches rankings, and backs the public read endpoints.

use std::collections::HashMap;
use std::path::Path;

use uuid::Uuid;

use crate::types::Article;

use super::{EventLog, StoreResult};

/// Immutable article catalog with id and slug lookups.
pub struct ArticleStore {
    articles: Vec<Article>,
    by_id: HashMap<Uuid, usize>,
    by_slug: HashMap<String, usize>,
}

impl ArticleStore {
    /// Load the catalog from a JSONL file; a missing file is an empty
    /// catalog.
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let articles: Vec<Article> = EventLog::new(path.as_ref()).load()?;
        if articles.is_empty() {
            log::warn!(
                "article catalog at {} is empty; slug resolution will fail",
                path.as_ref().display()
            );
        } else {
            log::info!("loaded {} articles", articles.len());
        }
        Ok(Self::from_articles(articles))
    }

    pub fn from_articles(articles: Vec<Article>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_slug = HashMap::new();

        for (idx, article) in articles.iter().enumerate() {
            by_id.entry(article.id).or_insert(idx);
            by_slug.entry(article.slug.clone()).or_insert(idx);
        }

        Self {
            articles,
            by_id,
            by_slug,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Article> {
        self.by_id.get(&id).map(|idx| &self.articles[*idx])
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Article> {
        self.by_slug.get(slug).map(|idx| &self.articles[*idx])
    }

    /// Resolve a slug to an article id. A miss is a miss: the caller treats
    /// it as not found, no fallback.
    pub fn resolve_slug(&self, slug: &str) -> Option<Uuid> {
        self.find_by_slug(slug).map(|article| article.id)
    }

    /// Published articles, newest first, paginated. Returns the page and
    /// the total published count.
    pub fn published(&self, page: usize, page_size: usize) -> (Vec<Article>, usize) {
        let mut published: Vec<&Article> = self
            .articles
            .iter()
            .filter(|article| article.is_published())
            .collect();
        published.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let total = published.len();
        let page = page.max(1);
        let items = published
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        (items, total)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArticleStatus;
    use chrono::{TimeZone, Utc};

    fn article(slug: &str, status: ArticleStatus, published_day: u32) -> Article {
        Article {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: format!("Title for {}", slug),
            intro: None,
            status,
            published_at: Some(Utc.with_ymd_and_hms(2024, 5, published_day, 9, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_slug_resolution() {
        let a = article("alpha", ArticleStatus::Published, 1);
        let id = a.id;
        let store = ArticleStore::from_articles(vec![a]);

        assert_eq!(store.resolve_slug("alpha"), Some(id));
        assert_eq!(store.resolve_slug("missing"), None);
    }

    #[test]
    fn test_published_excludes_drafts_and_sorts_newest_first() {
        let store = ArticleStore::from_articles(vec![
            article("old", ArticleStatus::Published, 1),
            article("draft", ArticleStatus::Draft, 2),
            article("new", ArticleStatus::Published, 20),
        ]);

        let (page, total) = store.published(1, 10);
        assert_eq!(total, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].slug, "new");
        assert_eq!(page[1].slug, "old");
    }

    #[test]
    fn test_published_pagination() {
        let articles: Vec<Article> = (1..=5)
            .map(|d| article(&format!("a{}", d), ArticleStatus::Published, d))
            .collect();
        let store = ArticleStore::from_articles(articles);

        let (page_one, total) = store.published(1, 2);
        let (page_three, _) = store.published(3, 2);
        assert_eq!(total, 5);
        assert_eq!(page_one.len(), 2);
        assert_eq!(page_three.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_empty_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = ArticleStore::load(dir.path().join("articles.jsonl")).unwrap();
        assert!(store.is_empty());
    }
}
