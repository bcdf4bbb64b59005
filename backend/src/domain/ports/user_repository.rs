//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// An account already exists for the email address.
        DuplicateEmail { email: String } =>
            "an account already exists for {email}",
    }
}

/// Port for user account storage and retrieval.
///
/// Emails are unique: inserting a user whose email collides with an
/// existing account fails with [`UserRepositoryError::DuplicateEmail`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user account.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;
}

/// Fixture implementation for testing without a real database.
///
/// Lookups return `None` and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_lookups_return_none() {
        let repo = FixtureUserRepository;

        let by_id = repo
            .find_by_id(&UserId::random())
            .await
            .expect("fixture lookup should succeed");
        assert!(by_id.is_none());

        let email = EmailAddress::new("ada@example.com").expect("valid email");
        let by_email = repo
            .find_by_email(&email)
            .await
            .expect("fixture lookup should succeed");
        assert!(by_email.is_none());
    }

    #[tokio::test]
    async fn fixture_repository_accepts_inserts() {
        let repo = FixtureUserRepository;
        let user = User::new(
            UserId::random(),
            EmailAddress::new("ada@example.com").expect("valid email"),
            DisplayName::new("Ada Lovelace").expect("valid display name"),
            chrono::Utc::now(),
        );

        repo.insert(&user)
            .await
            .expect("fixture insert should succeed");
    }

    #[rstest]
    fn duplicate_email_error_names_the_address() {
        let error = UserRepositoryError::duplicate_email("ada@example.com");
        assert!(error.to_string().contains("ada@example.com"));
    }
}
