//! Port for subscription persistence.

use async_trait::async_trait;

use crate::domain::{Subscription, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by subscription repository adapters.
    pub enum SubscriptionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "subscription repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "subscription repository query failed: {message}",
    }
}

/// Port for subscription storage and retrieval.
///
/// At most one subscription row exists per user; `upsert` replaces any
/// existing record. Absence of a row reads as the free tier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetch the subscription for a user, if one has been stored.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;

    /// Insert or replace the subscription for its user.
    async fn upsert(&self, subscription: &Subscription)
    -> Result<(), SubscriptionRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return `None` (free tier) and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn find_by_user_id(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        _subscription: &Subscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }
}
