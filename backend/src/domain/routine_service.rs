//! Routine derivation service.
//!
//! Wires the pure deriver to its two collaborators: the analysis store and
//! the premium gate. The deriver itself stays free of I/O and error
//! handling; this service absorbs both.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AnalysisRepository, AnalysisRepositoryError, PremiumGate, RoutinePlanQuery,
};
use crate::domain::{default_plan, derive_plan, AnalysisId, Error, RoutinePlan, SkinAnalysis, UserId};

/// Implementation of the [`RoutinePlanQuery`] driving port.
#[derive(Clone)]
pub struct RoutineService<A, G> {
    analyses: Arc<A>,
    premium: Arc<G>,
}

impl<A, G> RoutineService<A, G> {
    /// Create a new service with the given collaborators.
    pub fn new(analyses: Arc<A>, premium: Arc<G>) -> Self {
        Self { analyses, premium }
    }
}

fn map_analysis_error(error: AnalysisRepositoryError) -> Error {
    match error {
        AnalysisRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("analysis repository unavailable: {message}"))
        }
        AnalysisRepositoryError::Query { message } => {
            Error::internal(format!("analysis repository error: {message}"))
        }
    }
}

impl<A, G> RoutineService<A, G>
where
    A: AnalysisRepository,
    G: PremiumGate,
{
    /// Resolve the derivation context.
    ///
    /// An explicit analysis id must resolve to an analysis owned by the
    /// user; a missing or foreign id reports not-found rather than falling
    /// back, so stale links fail loudly instead of silently deriving from
    /// the wrong context. Without an id, the most recent analysis is used,
    /// and `None` means "derive the default plan".
    async fn resolve_analysis(
        &self,
        user_id: &UserId,
        analysis_id: Option<AnalysisId>,
    ) -> Result<Option<SkinAnalysis>, Error> {
        match analysis_id {
            Some(id) => {
                let analysis = self
                    .analyses
                    .find_by_id(&id)
                    .await
                    .map_err(map_analysis_error)?
                    .filter(|analysis| analysis.user_id == *user_id)
                    .ok_or_else(|| Error::not_found("no such analysis"))?;
                Ok(Some(analysis))
            }
            None => self
                .analyses
                .latest_for_user(user_id)
                .await
                .map_err(map_analysis_error),
        }
    }
}

#[async_trait]
impl<A, G> RoutinePlanQuery for RoutineService<A, G>
where
    A: AnalysisRepository,
    G: PremiumGate,
{
    async fn plan_for_user(
        &self,
        user_id: &UserId,
        analysis_id: Option<AnalysisId>,
    ) -> Result<RoutinePlan, Error> {
        let Some(analysis) = self.resolve_analysis(user_id, analysis_id).await? else {
            return Ok(default_plan());
        };

        let is_premium = self.premium.is_premium_user(user_id).await?;

        Ok(derive_plan(
            &analysis.detected_issues,
            analysis.skin_type,
            is_premium,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAnalysisRepository, MockPremiumGate};
    use crate::domain::{ErrorCode, IssueTag, SkinType};

    fn analysis_for(user_id: &UserId) -> SkinAnalysis {
        SkinAnalysis::builder(user_id.clone(), "s3://photos/1.jpg")
            .skin_type(SkinType::Combination)
            .detected_issues(vec![IssueTag::Acne, IssueTag::Dryness])
            .build()
    }

    fn service(
        analyses: MockAnalysisRepository,
        premium: MockPremiumGate,
    ) -> RoutineService<MockAnalysisRepository, MockPremiumGate> {
        RoutineService::new(Arc::new(analyses), Arc::new(premium))
    }

    #[tokio::test]
    async fn no_analyses_yields_the_default_plan_without_a_premium_lookup() {
        let mut analyses = MockAnalysisRepository::new();
        analyses
            .expect_latest_for_user()
            .times(1)
            .return_once(|_| Ok(None));
        let mut premium = MockPremiumGate::new();
        premium.expect_is_premium_user().times(0);

        let plan = service(analyses, premium)
            .plan_for_user(&UserId::random(), None)
            .await
            .expect("derivation succeeds");

        assert_eq!(plan, default_plan());
    }

    #[tokio::test]
    async fn latest_analysis_drives_the_derivation() {
        let user_id = UserId::random();
        let analysis = analysis_for(&user_id);
        let mut analyses = MockAnalysisRepository::new();
        analyses
            .expect_latest_for_user()
            .times(1)
            .return_once(move |_| Ok(Some(analysis)));
        let mut premium = MockPremiumGate::new();
        premium
            .expect_is_premium_user()
            .times(1)
            .return_once(|_| Ok(false));

        let plan = service(analyses, premium)
            .plan_for_user(&user_id, None)
            .await
            .expect("derivation succeeds");

        assert_eq!(
            plan,
            derive_plan(
                &[IssueTag::Acne, IssueTag::Dryness],
                SkinType::Combination,
                false
            )
        );
    }

    #[tokio::test]
    async fn explicit_analysis_must_belong_to_the_caller() {
        let analysis = analysis_for(&UserId::random());
        let requested = analysis.id;
        let mut analyses = MockAnalysisRepository::new();
        analyses
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(analysis)));
        let mut premium = MockPremiumGate::new();
        premium.expect_is_premium_user().times(0);

        let err = service(analyses, premium)
            .plan_for_user(&UserId::random(), Some(requested))
            .await
            .expect_err("foreign analysis is hidden");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn premium_flag_changes_the_derived_plan() {
        let user_id = UserId::random();
        let make_analyses = |user_id: &UserId| {
            let analysis = analysis_for(user_id);
            let mut analyses = MockAnalysisRepository::new();
            analyses
                .expect_latest_for_user()
                .times(1)
                .return_once(move |_| Ok(Some(analysis)));
            analyses
        };

        let mut free_gate = MockPremiumGate::new();
        free_gate
            .expect_is_premium_user()
            .times(1)
            .return_once(|_| Ok(false));
        let free_plan = service(make_analyses(&user_id), free_gate)
            .plan_for_user(&user_id, None)
            .await
            .expect("derivation succeeds");

        let mut premium_gate = MockPremiumGate::new();
        premium_gate
            .expect_is_premium_user()
            .times(1)
            .return_once(|_| Ok(true));
        let premium_plan = service(make_analyses(&user_id), premium_gate)
            .plan_for_user(&user_id, None)
            .await
            .expect("derivation succeeds");

        // Combination skin unlocks the premium oil-control insertions.
        assert_ne!(free_plan, premium_plan);
        assert!(
            premium_plan
                .morning
                .contains(&"oil-control toner with witch hazel".to_owned())
        );
    }

    #[tokio::test]
    async fn repository_failures_surface_as_domain_errors() {
        let mut analyses = MockAnalysisRepository::new();
        analyses
            .expect_latest_for_user()
            .times(1)
            .return_once(|_| Err(AnalysisRepositoryError::connection("refused")));
        let mut premium = MockPremiumGate::new();
        premium.expect_is_premium_user().times(0);

        let err = service(analyses, premium)
            .plan_for_user(&UserId::random(), None)
            .await
            .expect_err("lookup fails");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
