//! Port for journal entry persistence.

use async_trait::async_trait;

use crate::domain::{JournalEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by journal repository adapters.
    pub enum JournalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "journal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "journal repository query failed: {message}",
    }
}

/// Port for journal entry storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Persist a new journal entry.
    async fn insert(&self, entry: &JournalEntry) -> Result<(), JournalRepositoryError>;

    /// List a user's entries, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalRepositoryError>;
}

/// Fixture implementation for testing without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJournalRepository;

#[async_trait]
impl JournalRepository for FixtureJournalRepository {
    async fn insert(&self, _entry: &JournalEntry) -> Result<(), JournalRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_repository_starts_empty_and_accepts_writes() {
        let repo = FixtureJournalRepository;
        let user_id = UserId::random();

        assert!(
            repo.list_for_user(&user_id)
                .await
                .expect("fixture listing should succeed")
                .is_empty()
        );

        let entry = JournalEntry::builder(user_id).notes("calm day").build();
        repo.insert(&entry)
            .await
            .expect("fixture insert should succeed");
    }
}
