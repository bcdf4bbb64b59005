//! Knowledge base HTTP handler.
//!
//! ```text
//! GET /api/v1/knowledge
//! GET /api/v1/knowledge?q=retinol
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::KnowledgeRepositoryError;
use crate::domain::{Error, KnowledgeArticle};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for `GET /api/v1/knowledge`.
#[derive(Debug, Deserialize)]
pub struct KnowledgeParams {
    /// Free-text search over titles and summaries.
    pub q: Option<String>,
}

/// Response payload for one knowledge article.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeArticleResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub premium_only: bool,
}

impl From<KnowledgeArticle> for KnowledgeArticleResponse {
    fn from(value: KnowledgeArticle) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            category: value.category,
            summary: value.summary,
            premium_only: value.premium_only,
        }
    }
}

fn map_knowledge_repository_error(error: KnowledgeRepositoryError) -> Error {
    match error {
        KnowledgeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("knowledge repository unavailable: {message}"))
        }
        KnowledgeRepositoryError::Query { message } => {
            Error::internal(format!("knowledge repository error: {message}"))
        }
    }
}

/// List knowledge articles visible at the caller's tier.
#[utoipa::path(
    get,
    path = "/api/v1/knowledge",
    params(("q" = Option<String>, Query, description = "Free-text search")),
    responses(
        (status = 200, description = "Articles", body = [KnowledgeArticleResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["knowledge"],
    operation_id = "listKnowledgeArticles"
)]
#[get("/knowledge")]
pub async fn list_knowledge_articles(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<KnowledgeParams>,
) -> ApiResult<web::Json<Vec<KnowledgeArticleResponse>>> {
    let user_id = session.require_user_id()?;
    let is_premium = state.premium.is_premium_user(&user_id).await?;
    let query = params.into_inner().q.unwrap_or_default();

    let articles = state
        .knowledge
        .list()
        .await
        .map_err(map_knowledge_repository_error)?;

    Ok(web::Json(
        articles
            .into_iter()
            .filter(|article| article.visible_to(is_premium) && article.matches(&query))
            .map(KnowledgeArticleResponse::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArticleId;
    use rstest::rstest;

    #[rstest]
    fn response_mirrors_the_domain_article() {
        let article = KnowledgeArticle {
            id: ArticleId::random(),
            title: "Retinoids: Benefits and Best Practices".to_owned(),
            category: "ingredients".to_owned(),
            summary: "How to introduce retinol without wrecking your barrier.".to_owned(),
            premium_only: true,
        };

        let response = KnowledgeArticleResponse::from(article);
        assert!(response.premium_only);
        assert_eq!(response.category, "ingredients");
    }
}
