//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserRepositoryError::query("database error"),
        _ => UserRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain User, rejecting rows that violate
/// domain invariants (these indicate data written outside the application).
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from_strings(
        row.id.to_string(),
        row.email,
        row.display_name,
        row.created_at,
    )
    .map_err(|err| UserRepositoryError::query(format!("invalid user row: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            display_name: user.display_name().as_ref(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match error {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    UserRepositoryError::duplicate_email(user.email().as_ref())
                }
                other => map_diesel_error(other),
            })
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map(row_to_user).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        result.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, UserRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, UserRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn valid_rows_convert_to_domain_users() {
        let row = UserRow {
            id: uuid::Uuid::new_v4(),
            email: "ada@example.com".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.email().as_ref(), "ada@example.com");
    }

    #[rstest]
    fn corrupt_rows_are_rejected() {
        let row = UserRow {
            id: uuid::Uuid::new_v4(),
            email: "not-an-email".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let err = row_to_user(row).expect_err("invalid email");
        assert!(matches!(err, UserRepositoryError::Query { .. }));
    }
}
