//! Builders for HTTP state ports backed by real or fixture adapters.

use std::sync::Arc;

use backend::domain::ports::FixtureAnalysisEngine;
use backend::domain::{
    AccountService, AnalysisService, PremiumService, RoutineService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselAnalysisRepository, DieselJournalRepository, DieselKnowledgeRepository,
    DieselSubscriptionRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the HTTP state from configuration.
///
/// With a database pool, every repository port gets its Diesel adapter and
/// the domain services are wired on top. Without one, fixture ports keep
/// the whole surface responsive for local development and tests. The
/// analysis engine is always the fixture; the real engine is an external
/// service swapped in at deployment.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let Some(pool) = &config.db_pool else {
        return HttpState::fixtures();
    };

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(pool.clone()));
    let analyses = Arc::new(DieselAnalysisRepository::new(pool.clone()));
    let journal = Arc::new(DieselJournalRepository::new(pool.clone()));
    let knowledge = Arc::new(DieselKnowledgeRepository::new(pool.clone()));
    let engine = Arc::new(FixtureAnalysisEngine);

    let premium = Arc::new(PremiumService::new(subscriptions.clone()));
    let analysis_service = Arc::new(AnalysisService::new(analyses.clone(), engine));
    let routine_service = Arc::new(RoutineService::new(analyses, premium.clone()));
    let account_service = Arc::new(AccountService::new(users.clone(), subscriptions.clone()));

    HttpState {
        login: account_service,
        users,
        premium,
        routines: routine_service,
        analyses: analysis_service.clone(),
        analyses_query: analysis_service,
        subscriptions,
        journal,
        knowledge,
    }
}
