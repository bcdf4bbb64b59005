//! PostgreSQL-backed `AnalysisRepository` implementation using Diesel ORM.
//!
//! Analyses are append-only; this adapter offers insert and read paths only.
//! Row mapping degrades gracefully on unrecognised enum strings (they are
//! logged and skipped) so one bad row cannot take down a listing.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{AnalysisRepository, AnalysisRepositoryError};
use crate::domain::{
    AnalysisId, IssueTag, Recommendations, SeverityScores, SkinAnalysis, SkinType, UserId,
};

use super::models::{NewSkinAnalysisRow, SkinAnalysisRow};
use super::pool::{DbPool, PoolError};
use super::schema::skin_analyses;

/// Diesel-backed implementation of the `AnalysisRepository` port.
#[derive(Clone)]
pub struct DieselAnalysisRepository {
    pool: DbPool,
}

impl DieselAnalysisRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain analysis repository errors.
fn map_pool_error(error: PoolError) -> AnalysisRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AnalysisRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain analysis repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AnalysisRepositoryError {
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
        DieselError::NotFound => AnalysisRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AnalysisRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => AnalysisRepositoryError::query("database error"),
        _ => AnalysisRepositoryError::query("database error"),
    }
}

fn parse_issue_tags(raw: Vec<String>, analysis_id: uuid::Uuid) -> Vec<IssueTag> {
    raw.into_iter()
        .filter_map(|value| match IssueTag::from_str(&value) {
            Ok(tag) => Some(tag),
            Err(_) => {
                tracing::warn!(
                    value = %value,
                    analysis_id = %analysis_id,
                    "unrecognised issue tag, skipping"
                );
                None
            }
        })
        .collect()
}

fn parse_severity_scores(raw: serde_json::Value, analysis_id: uuid::Uuid) -> SeverityScores {
    serde_json::from_value(raw).unwrap_or_else(|error| {
        tracing::warn!(
            %error,
            analysis_id = %analysis_id,
            "invalid severity scores payload, treating as unscored"
        );
        SeverityScores::new()
    })
}

fn parse_recommendations(raw: serde_json::Value, analysis_id: uuid::Uuid) -> Recommendations {
    serde_json::from_value(raw).unwrap_or_else(|error| {
        tracing::warn!(
            %error,
            analysis_id = %analysis_id,
            "invalid recommendations payload, treating as empty"
        );
        Recommendations::default()
    })
}

/// Convert a database row to a domain SkinAnalysis.
fn row_to_analysis(row: SkinAnalysisRow) -> SkinAnalysis {
    let skin_type = SkinType::from_str(&row.skin_type).unwrap_or_else(|_| {
        tracing::warn!(
            value = %row.skin_type,
            analysis_id = %row.id,
            "unrecognised skin type, defaulting to Normal"
        );
        SkinType::Normal
    });
    let ai_results = match row.ai_results {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        other => {
            tracing::warn!(
                value_type = %json_type_name(&other),
                analysis_id = %row.id,
                "ai results payload is not an object, treating as empty"
            );
            Default::default()
        }
    };

    SkinAnalysis {
        id: AnalysisId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        image_url: row.image_url,
        ai_results,
        skin_type,
        detected_issues: parse_issue_tags(row.detected_issues, row.id),
        severity_scores: parse_severity_scores(row.severity_scores, row.id),
        recommendations: parse_recommendations(row.recommendations, row.id),
        created_at: row.created_at,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[async_trait]
impl AnalysisRepository for DieselAnalysisRepository {
    async fn insert(&self, analysis: &SkinAnalysis) -> Result<(), AnalysisRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ai_results =
            serde_json::Value::Object(analysis.ai_results.clone().into_iter().collect());
        let severity_scores = serde_json::to_value(&analysis.severity_scores).map_err(|err| {
            AnalysisRepositoryError::query(format!("failed to serialise severity scores: {err}"))
        })?;
        let recommendations = serde_json::to_value(&analysis.recommendations).map_err(|err| {
            AnalysisRepositoryError::query(format!("failed to serialise recommendations: {err}"))
        })?;

        let new_row = NewSkinAnalysisRow {
            id: *analysis.id.as_uuid(),
            user_id: *analysis.user_id.as_uuid(),
            image_url: &analysis.image_url,
            ai_results: &ai_results,
            skin_type: analysis.skin_type.as_str(),
            detected_issues: analysis
                .detected_issues
                .iter()
                .map(|tag| tag.as_str().to_owned())
                .collect(),
            severity_scores: &severity_scores,
            recommendations: &recommendations,
            created_at: analysis.created_at,
        };

        diesel::insert_into(skin_analyses::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<SkinAnalysisRow> = skin_analyses::table
            .filter(skin_analyses::id.eq(analysis_id.as_uuid()))
            .select(SkinAnalysisRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_analysis))
    }

    async fn latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<SkinAnalysisRow> = skin_analyses::table
            .filter(skin_analyses::user_id.eq(user_id.as_uuid()))
            .order(skin_analyses::created_at.desc())
            .select(SkinAnalysisRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_analysis))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SkinAnalysis>, AnalysisRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SkinAnalysisRow> = skin_analyses::table
            .filter(skin_analyses::user_id.eq(user_id.as_uuid()))
            .order(skin_analyses::created_at.desc())
            .select(SkinAnalysisRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_analysis).collect())
    }
}
