//! Driving port for routine derivation.

use async_trait::async_trait;

use crate::domain::{default_plan, AnalysisId, Error, RoutinePlan, UserId};

/// Domain use-case port producing a personalised routine plan.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutinePlanQuery: Send + Sync {
    /// Derive the routine plan for a user.
    ///
    /// When `analysis_id` is given, that analysis provides the derivation
    /// context (it must belong to the user); otherwise the user's most
    /// recent analysis is used. A user with no analyses receives the fixed
    /// default plan.
    async fn plan_for_user(
        &self,
        user_id: &UserId,
        analysis_id: Option<AnalysisId>,
    ) -> Result<RoutinePlan, Error>;
}

/// Fixture implementation returning the default plan for every user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoutinePlanQuery;

#[async_trait]
impl RoutinePlanQuery for FixtureRoutinePlanQuery {
    async fn plan_for_user(
        &self,
        _user_id: &UserId,
        _analysis_id: Option<AnalysisId>,
    ) -> Result<RoutinePlan, Error> {
        Ok(default_plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_query_returns_the_default_plan() {
        let query = FixtureRoutinePlanQuery;
        let plan = query
            .plan_for_user(&UserId::random(), None)
            .await
            .expect("fixture query should succeed");
        assert_eq!(plan, default_plan());
    }
}
