//! Premium gate service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{PremiumGate, SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{Error, UserId};

/// Subscription-backed implementation of the [`PremiumGate`] port.
///
/// A missing subscription row reads as the free tier, so new users are
/// never premium until an upgrade is stored.
#[derive(Clone)]
pub struct PremiumService<S> {
    subscriptions: Arc<S>,
}

impl<S> PremiumService<S> {
    /// Create a new service over the given repository.
    pub fn new(subscriptions: Arc<S>) -> Self {
        Self { subscriptions }
    }
}

pub(crate) fn map_subscription_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
    }
}

#[async_trait]
impl<S> PremiumGate for PremiumService<S>
where
    S: SubscriptionRepository,
{
    async fn is_premium_user(&self, user_id: &UserId) -> Result<bool, Error> {
        let subscription = self
            .subscriptions
            .find_by_user_id(user_id)
            .await
            .map_err(map_subscription_error)?;

        Ok(subscription.is_some_and(|record| record.grants_premium(Utc::now())))
    }
}
