//! Analysis submission and retrieval services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AnalysisCommand, AnalysisEngine, AnalysisEngineError, AnalysisQuery, AnalysisRepository,
    AnalysisRepositoryError, SubmitAnalysisRequest,
};
use crate::domain::{AnalysisId, Error, SkinAnalysis, UserId};

/// Implementation of the analysis driving ports.
#[derive(Clone)]
pub struct AnalysisService<R, E> {
    analyses: Arc<R>,
    engine: Arc<E>,
}

impl<R, E> AnalysisService<R, E> {
    /// Create a new service with the given repository and engine.
    pub fn new(analyses: Arc<R>, engine: Arc<E>) -> Self {
        Self { analyses, engine }
    }
}

fn map_repository_error(error: AnalysisRepositoryError) -> Error {
    match error {
        AnalysisRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("analysis repository unavailable: {message}"))
        }
        AnalysisRepositoryError::Query { message } => {
            Error::internal(format!("analysis repository error: {message}"))
        }
    }
}

fn map_engine_error(error: AnalysisEngineError) -> Error {
    match error {
        AnalysisEngineError::Unavailable { message } => {
            Error::service_unavailable(format!("analysis engine unavailable: {message}"))
        }
        AnalysisEngineError::Rejected { message } => {
            Error::invalid_request(format!("image rejected: {message}"))
        }
    }
}

#[async_trait]
impl<R, E> AnalysisCommand for AnalysisService<R, E>
where
    R: AnalysisRepository,
    E: AnalysisEngine,
{
    async fn submit(&self, request: SubmitAnalysisRequest) -> Result<SkinAnalysis, Error> {
        let SubmitAnalysisRequest { user_id, image_url } = request;

        let assessment = self
            .engine
            .assess(&user_id, &image_url)
            .await
            .map_err(map_engine_error)?;

        let analysis = SkinAnalysis::builder(user_id, image_url)
            .skin_type(assessment.skin_type)
            .detected_issues(assessment.detected_issues)
            .severity_scores(assessment.severity_scores)
            .recommendations(assessment.recommendations)
            .build();
        let analysis = assessment
            .ai_results
            .into_iter()
            .fold(analysis, |mut acc, (key, value)| {
                acc.ai_results.insert(key, value);
                acc
            });

        self.analyses
            .insert(&analysis)
            .await
            .map_err(map_repository_error)?;

        Ok(analysis)
    }
}

#[async_trait]
impl<R, E> AnalysisQuery for AnalysisService<R, E>
where
    R: AnalysisRepository,
    E: AnalysisEngine,
{
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SkinAnalysis>, Error> {
        self.analyses
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, user_id: &UserId, analysis_id: &AnalysisId) -> Result<SkinAnalysis, Error> {
        self.analyses
            .find_by_id(analysis_id)
            .await
            .map_err(map_repository_error)?
            .filter(|analysis| analysis.user_id == *user_id)
            .ok_or_else(|| Error::not_found("no such analysis"))
    }
}
