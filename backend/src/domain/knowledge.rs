//! Knowledge base articles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable article identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Generate a new random [`ArticleId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct an [`ArticleId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One knowledge base article.
///
/// The catalogue is read-only from the application's perspective; articles
/// are seeded by content tooling. Premium-only articles are filtered out
/// for readers without a premium subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct KnowledgeArticle {
    /// Stable article identifier.
    pub id: ArticleId,
    /// Headline shown in listings.
    pub title: String,
    /// Topic category (e.g. "basics", "ingredients", "treatments").
    pub category: String,
    /// Short teaser shown in listings.
    pub summary: String,
    /// Whether only premium readers may see the article.
    pub premium_only: bool,
}

impl KnowledgeArticle {
    /// Whether the article matches a free-text search query.
    ///
    /// Matching is case-insensitive over title and summary; an empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.summary.to_lowercase().contains(&needle)
    }

    /// Whether a reader at the given premium level may see the article.
    pub fn visible_to(&self, is_premium: bool) -> bool {
        is_premium || !self.premium_only
    }
}
