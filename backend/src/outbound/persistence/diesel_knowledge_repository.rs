//! PostgreSQL-backed `KnowledgeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{KnowledgeRepository, KnowledgeRepositoryError};
use crate::domain::{ArticleId, KnowledgeArticle};

use super::models::KnowledgeArticleRow;
use super::pool::{DbPool, PoolError};
use super::schema::knowledge_articles;

/// Diesel-backed implementation of the `KnowledgeRepository` port.
#[derive(Clone)]
pub struct DieselKnowledgeRepository {
    pool: DbPool,
}

impl DieselKnowledgeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain knowledge repository errors.
fn map_pool_error(error: PoolError) -> KnowledgeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            KnowledgeRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain knowledge repository errors.
fn map_diesel_error(error: diesel::result::Error) -> KnowledgeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => KnowledgeRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            KnowledgeRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => KnowledgeRepositoryError::query("database error"),
        _ => KnowledgeRepositoryError::query("database error"),
    }
}

fn row_to_article(row: KnowledgeArticleRow) -> KnowledgeArticle {
    KnowledgeArticle {
        id: ArticleId::from_uuid(row.id),
        title: row.title,
        category: row.category,
        summary: row.summary,
        premium_only: row.premium_only,
    }
}

#[async_trait]
impl KnowledgeRepository for DieselKnowledgeRepository {
    async fn list(&self) -> Result<Vec<KnowledgeArticle>, KnowledgeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<KnowledgeArticleRow> = knowledge_articles::table
            .order(knowledge_articles::title.asc())
            .select(KnowledgeArticleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_article).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_domain_articles() {
        let row = KnowledgeArticleRow {
            id: uuid::Uuid::new_v4(),
            title: "The Science of Hydration".to_owned(),
            category: "basics".to_owned(),
            summary: "Humectants, emollients, and occlusives explained.".to_owned(),
            premium_only: false,
        };

        let article = row_to_article(row);
        assert_eq!(article.title, "The Science of Hydration");
        assert!(!article.premium_only);
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, KnowledgeRepositoryError::Query { .. }));
    }
}
