//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnalysisCommand, AnalysisQuery, JournalRepository, KnowledgeRepository, LoginService,
    PremiumGate, RoutinePlanQuery, SubscriptionRepository, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login use-cases.
    pub login: Arc<dyn LoginService>,
    /// User account lookups.
    pub users: Arc<dyn UserRepository>,
    /// The premium predicate.
    pub premium: Arc<dyn PremiumGate>,
    /// Routine derivation.
    pub routines: Arc<dyn RoutinePlanQuery>,
    /// Analysis submission.
    pub analyses: Arc<dyn AnalysisCommand>,
    /// Analysis listing and retrieval.
    pub analyses_query: Arc<dyn AnalysisQuery>,
    /// Subscription reads and tier changes.
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    /// Journal entry storage.
    pub journal: Arc<dyn JournalRepository>,
    /// Knowledge base catalogue.
    pub knowledge: Arc<dyn KnowledgeRepository>,
}

impl HttpState {
    /// State wired entirely with fixture ports.
    ///
    /// Used for DB-less operation and handler tests; every endpoint comes
    /// up, with analysis submission reporting service-unavailable.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _login = state.login.clone();
    /// ```
    pub fn fixtures() -> Self {
        use crate::domain::ports::{
            FixtureAnalysisCommand, FixtureAnalysisQuery, FixtureJournalRepository,
            FixtureKnowledgeRepository, FixtureLoginService, FixturePremiumGate,
            FixtureRoutinePlanQuery, FixtureSubscriptionRepository, FixtureUserRepository,
        };

        Self {
            login: Arc::new(FixtureLoginService),
            users: Arc::new(FixtureUserRepository),
            premium: Arc::new(FixturePremiumGate::free()),
            routines: Arc::new(FixtureRoutinePlanQuery),
            analyses: Arc::new(FixtureAnalysisCommand),
            analyses_query: Arc::new(FixtureAnalysisQuery),
            subscriptions: Arc::new(FixtureSubscriptionRepository),
            journal: Arc::new(FixtureJournalRepository),
            knowledge: Arc::new(FixtureKnowledgeRepository),
        }
    }
}
