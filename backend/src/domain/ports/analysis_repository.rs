//! Port for skin analysis persistence.

use async_trait::async_trait;

use crate::domain::{AnalysisId, SkinAnalysis, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by analysis repository adapters.
    pub enum AnalysisRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "analysis repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "analysis repository query failed: {message}",
    }
}

/// Port for skin analysis storage and retrieval.
///
/// Analyses are append-only: there is no update or delete. Listing orders
/// newest first, so `latest_for_user` is the head of `list_for_user`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Persist a completed analysis.
    async fn insert(&self, analysis: &SkinAnalysis) -> Result<(), AnalysisRepositoryError>;

    /// Fetch one analysis by identifier.
    async fn find_by_id(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError>;

    /// Fetch the most recent analysis for a user, if any exists.
    async fn latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError>;

    /// List a user's analyses, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SkinAnalysis>, AnalysisRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return nothing and writes are discarded; callers exercising the
/// no-analysis fallback path can use this directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalysisRepository;

#[async_trait]
impl AnalysisRepository for FixtureAnalysisRepository {
    async fn insert(&self, _analysis: &SkinAnalysis) -> Result<(), AnalysisRepositoryError> {
        Ok(())
    }

    async fn find_by_id(
        &self,
        _analysis_id: &AnalysisId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError> {
        Ok(None)
    }

    async fn latest_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<SkinAnalysis>, AnalysisRepositoryError> {
        Ok(None)
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<SkinAnalysis>, AnalysisRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_has_no_analyses() {
        let repo = FixtureAnalysisRepository;
        let user_id = UserId::random();

        assert!(
            repo.latest_for_user(&user_id)
                .await
                .expect("fixture lookup should succeed")
                .is_none()
        );
        assert!(
            repo.list_for_user(&user_id)
                .await
                .expect("fixture listing should succeed")
                .is_empty()
        );
        assert!(
            repo.find_by_id(&AnalysisId::random())
                .await
                .expect("fixture lookup should succeed")
                .is_none()
        );
    }

    #[tokio::test]
    async fn fixture_repository_accepts_inserts() {
        let repo = FixtureAnalysisRepository;
        let analysis = SkinAnalysis::builder(UserId::random(), "s3://photos/1.jpg").build();

        repo.insert(&analysis)
            .await
            .expect("fixture insert should succeed");
    }
}
