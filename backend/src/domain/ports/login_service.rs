//! Driving port for registration and login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it
//! without knowing the backing infrastructure, which keeps HTTP handler
//! tests deterministic.
//!
//! Password verification is the identity provider's concern and is out of
//! scope here; the service only resolves accounts by email.

use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, Error, User};

/// Request payload for account registration.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    /// Login email; must be unused.
    pub email: EmailAddress,
    /// Display name shown in the application.
    pub display_name: DisplayName,
}

/// Domain use-case port for registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Create a new account and return it.
    ///
    /// Fails with a conflict error when the email is already registered.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Resolve an account by email, or fail with an unauthorized error.
    async fn authenticate(&self, email: &EmailAddress) -> Result<User, Error>;
}

/// In-memory authenticator used until persistence is wired.
///
/// Registration echoes the request back as a fresh account;
/// `demo@skininsight.app` authenticates successfully and produces a fixed
/// user id, preserving the development login.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

/// Email accepted by [`FixtureLoginService::authenticate`].
pub const FIXTURE_LOGIN_EMAIL: &str = "demo@skininsight.app";

/// User id produced by [`FixtureLoginService`] for the demo account.
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn fixture_user(email: EmailAddress) -> Result<User, Error> {
    let id = crate::domain::UserId::new(FIXTURE_LOGIN_USER_ID)
        .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
    let display_name = DisplayName::new("Demo User")
        .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
    Ok(User::new(id, email, display_name, chrono::Utc::now()))
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            email,
            display_name,
        } = request;
        Ok(User::new(
            crate::domain::UserId::random(),
            email,
            display_name,
            chrono::Utc::now(),
        ))
    }

    async fn authenticate(&self, email: &EmailAddress) -> Result<User, Error> {
        if email.as_ref() == FIXTURE_LOGIN_EMAIL {
            fixture_user(email.clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
