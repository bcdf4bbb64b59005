//! Driving ports for analysis submission and retrieval.

use async_trait::async_trait;

use crate::domain::{AnalysisId, Error, SkinAnalysis, UserId};

/// Request payload for submitting an uploaded photo for analysis.
#[derive(Debug, Clone)]
pub struct SubmitAnalysisRequest {
    /// Owner of the upload.
    pub user_id: UserId,
    /// Location of the uploaded photo in object storage.
    pub image_url: String,
}

/// Domain use-case port for creating analyses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisCommand: Send + Sync {
    /// Run the analysis engine over an upload and persist the result.
    async fn submit(&self, request: SubmitAnalysisRequest) -> Result<SkinAnalysis, Error>;
}

/// Domain use-case port for reading analyses.
///
/// Ownership is enforced here: requesting another user's analysis reports
/// not-found rather than forbidden, so ids cannot be probed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisQuery: Send + Sync {
    /// List the user's analyses, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SkinAnalysis>, Error>;

    /// Fetch one analysis owned by the user.
    async fn get(&self, user_id: &UserId, analysis_id: &AnalysisId) -> Result<SkinAnalysis, Error>;
}

/// Fixture command rejecting submissions as unavailable.
///
/// Used when no engine or database is wired; the HTTP surface still comes
/// up and reports a clean 503 for this endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalysisCommand;

#[async_trait]
impl AnalysisCommand for FixtureAnalysisCommand {
    async fn submit(&self, _request: SubmitAnalysisRequest) -> Result<SkinAnalysis, Error> {
        Err(Error::service_unavailable("analysis engine not configured"))
    }
}

/// Fixture query for a user with no analyses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalysisQuery;

#[async_trait]
impl AnalysisQuery for FixtureAnalysisQuery {
    async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<SkinAnalysis>, Error> {
        Ok(Vec::new())
    }

    async fn get(
        &self,
        _user_id: &UserId,
        _analysis_id: &AnalysisId,
    ) -> Result<SkinAnalysis, Error> {
        Err(Error::not_found("no such analysis"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_command_reports_unavailable() {
        let command = FixtureAnalysisCommand;
        let request = SubmitAnalysisRequest {
            user_id: UserId::random(),
            image_url: "s3://photos/1.jpg".to_owned(),
        };

        let err = command.submit(request).await.expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn fixture_query_has_no_analyses() {
        let query = FixtureAnalysisQuery;
        let user_id = UserId::random();

        assert!(
            query
                .list_for_user(&user_id)
                .await
                .expect("fixture listing should succeed")
                .is_empty()
        );

        let err = query
            .get(&user_id, &AnalysisId::random())
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
