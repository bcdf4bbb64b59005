//! Port for the knowledge base catalogue.

use async_trait::async_trait;

use crate::domain::{ArticleId, KnowledgeArticle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by knowledge repository adapters.
    pub enum KnowledgeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "knowledge repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "knowledge repository query failed: {message}",
    }
}

/// Port for reading the knowledge base catalogue.
///
/// The catalogue is read-only; search and premium visibility filtering
/// happen on the domain type, not in the adapter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeRepository: Send + Sync {
    /// List every article in the catalogue.
    async fn list(&self) -> Result<Vec<KnowledgeArticle>, KnowledgeRepositoryError>;
}

/// Fixture implementation carrying a small built-in catalogue.
///
/// Useful for DB-less operation and handler tests; the selection mirrors
/// the seeded editorial content.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureKnowledgeRepository;

fn seeded_article(title: &str, category: &str, summary: &str, premium_only: bool) -> KnowledgeArticle {
    KnowledgeArticle {
        id: ArticleId::random(),
        title: title.to_owned(),
        category: category.to_owned(),
        summary: summary.to_owned(),
        premium_only,
    }
}

#[async_trait]
impl KnowledgeRepository for FixtureKnowledgeRepository {
    async fn list(&self) -> Result<Vec<KnowledgeArticle>, KnowledgeRepositoryError> {
        Ok(vec![
            seeded_article(
                "Understanding Your Skin Barrier",
                "basics",
                "Why the lipid barrier matters and how to keep it intact.",
                false,
            ),
            seeded_article(
                "The Science of Hydration",
                "basics",
                "Humectants, emollients, and occlusives explained.",
                false,
            ),
            seeded_article(
                "Acne: Causes and Solutions",
                "treatments",
                "From comedones to cysts, and the actives that help.",
                false,
            ),
            seeded_article(
                "Retinoids: Benefits and Best Practices",
                "ingredients",
                "How to introduce retinol without wrecking your barrier.",
                true,
            ),
            seeded_article(
                "Advanced Hyperpigmentation Treatments",
                "treatments",
                "Tranexamic acid, alpha arbutin, and in-office options.",
                true,
            ),
            seeded_article(
                "Complete Guide to Exfoliation",
                "guides",
                "AHAs, BHAs, and enzymes, and how often to use them.",
                false,
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_catalogue_mixes_free_and_premium_articles() {
        let repo = FixtureKnowledgeRepository;
        let articles = repo.list().await.expect("fixture listing should succeed");

        assert!(!articles.is_empty());
        assert!(articles.iter().any(|article| article.premium_only));
        assert!(articles.iter().any(|article| !article.premium_only));
    }
}
