//! Account registration and login service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    LoginService, RegisterUserRequest, SubscriptionRepository, UserRepository, UserRepositoryError,
};
use crate::domain::premium::map_subscription_error;
use crate::domain::{
    EmailAddress, Error, Subscription, SubscriptionStatus, SubscriptionTier, User, UserId,
};

/// Repository-backed implementation of the [`LoginService`] port.
///
/// Registration creates the account plus a free-tier trial subscription,
/// so `GET /subscription` has a row to report from the first request.
/// Credential verification belongs to the external identity provider;
/// this service only resolves accounts by email.
#[derive(Clone)]
pub struct AccountService<U, S> {
    users: Arc<U>,
    subscriptions: Arc<S>,
}

impl<U, S> AccountService<U, S> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, subscriptions: Arc<S>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("an account already exists for {email}"))
        }
    }
}

#[async_trait]
impl<U, S> LoginService for AccountService<U, S>
where
    U: UserRepository,
    S: SubscriptionRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            email,
            display_name,
        } = request;

        let now = Utc::now();
        let user = User::new(UserId::random(), email, display_name, now);
        self.users.insert(&user).await.map_err(map_user_error)?;

        let trial = Subscription {
            user_id: user.id().clone(),
            tier: SubscriptionTier::Free,
            status: SubscriptionStatus::Trial,
            expires_at: None,
            updated_at: now,
        };
        self.subscriptions
            .upsert(&trial)
            .await
            .map_err(map_subscription_error)?;

        Ok(user)
    }

    async fn authenticate(&self, email: &EmailAddress) -> Result<User, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
