//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod analysis_engine;
mod analysis_ops;
mod analysis_repository;
mod journal_repository;
mod knowledge_repository;
mod login_service;
mod premium_gate;
mod routine_plan_query;
mod subscription_repository;
mod user_repository;

#[cfg(test)]
pub use analysis_engine::MockAnalysisEngine;
pub use analysis_engine::{
    AnalysisAssessment, AnalysisEngine, AnalysisEngineError, FixtureAnalysisEngine,
};
#[cfg(test)]
pub use analysis_ops::{MockAnalysisCommand, MockAnalysisQuery};
pub use analysis_ops::{
    AnalysisCommand, AnalysisQuery, FixtureAnalysisCommand, FixtureAnalysisQuery,
    SubmitAnalysisRequest,
};
#[cfg(test)]
pub use analysis_repository::MockAnalysisRepository;
pub use analysis_repository::{
    AnalysisRepository, AnalysisRepositoryError, FixtureAnalysisRepository,
};
#[cfg(test)]
pub use journal_repository::MockJournalRepository;
pub use journal_repository::{FixtureJournalRepository, JournalRepository, JournalRepositoryError};
#[cfg(test)]
pub use knowledge_repository::MockKnowledgeRepository;
pub use knowledge_repository::{
    FixtureKnowledgeRepository, KnowledgeRepository, KnowledgeRepositoryError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FixtureLoginService, LoginService, RegisterUserRequest, FIXTURE_LOGIN_EMAIL,
    FIXTURE_LOGIN_USER_ID,
};
#[cfg(test)]
pub use premium_gate::MockPremiumGate;
pub use premium_gate::{FixturePremiumGate, PremiumGate};
#[cfg(test)]
pub use routine_plan_query::MockRoutinePlanQuery;
pub use routine_plan_query::{FixtureRoutinePlanQuery, RoutinePlanQuery};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
