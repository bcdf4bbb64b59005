//! PostgreSQL-backed `SubscriptionRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{Subscription, SubscriptionStatus, SubscriptionTier, UserId};

use super::models::{SubscriptionRow, SubscriptionUpsert};
use super::pool::{DbPool, PoolError};
use super::schema::subscriptions;

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain subscription repository errors.
fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SubscriptionRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain subscription repository errors.
fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
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
        DieselError::NotFound => SubscriptionRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            SubscriptionRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => SubscriptionRepositoryError::query("database error"),
        _ => SubscriptionRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain Subscription.
///
/// Unrecognised tier or status strings degrade to the safe defaults (free,
/// inactive) with a warning rather than failing the request.
fn row_to_subscription(row: SubscriptionRow) -> Subscription {
    let tier = SubscriptionTier::from_str(&row.tier).unwrap_or_else(|_| {
        tracing::warn!(
            value = %row.tier,
            user_id = %row.user_id,
            "unrecognised tier value, defaulting to Free"
        );
        SubscriptionTier::Free
    });
    let status = SubscriptionStatus::from_str(&row.status).unwrap_or_else(|_| {
        tracing::warn!(
            value = %row.status,
            user_id = %row.user_id,
            "unrecognised status value, defaulting to Inactive"
        );
        SubscriptionStatus::Inactive
    });

    Subscription {
        user_id: UserId::from_uuid(row.user_id),
        tier,
        status,
        expires_at: row.expires_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let result: Option<SubscriptionRow> = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id.as_uuid()))
            .select(SubscriptionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(result.map(row_to_subscription))
    }

    async fn upsert(
        &self,
        subscription: &Subscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = SubscriptionUpsert {
            user_id: *subscription.user_id.as_uuid(),
            tier: subscription.tier.as_str(),
            status: subscription.status.as_str(),
            expires_at: subscription.expires_at,
            updated_at: subscription.updated_at,
        };

        diesel::insert_into(subscriptions::table)
            .values(&row)
            .on_conflict(subscriptions::user_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
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
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            SubscriptionRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn row_to_subscription_parses_known_strings() {
        let row = SubscriptionRow {
            user_id: uuid::Uuid::new_v4(),
            tier: "premium".to_owned(),
            status: "active".to_owned(),
            expires_at: None,
            updated_at: Utc::now(),
        };

        let subscription = row_to_subscription(row);
        assert_eq!(subscription.tier, SubscriptionTier::Premium);
        assert_eq!(subscription.status, SubscriptionStatus::Active);
    }

    #[rstest]
    fn row_to_subscription_degrades_unknown_strings() {
        let row = SubscriptionRow {
            user_id: uuid::Uuid::new_v4(),
            tier: "platinum".to_owned(),
            status: "paused".to_owned(),
            expires_at: None,
            updated_at: Utc::now(),
        };

        let subscription = row_to_subscription(row);
        assert_eq!(subscription.tier, SubscriptionTier::Free);
        assert_eq!(subscription.status, SubscriptionStatus::Inactive);
        assert!(!subscription.grants_premium(Utc::now()));
    }
}
