//! PostgreSQL-backed `JournalRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{JournalRepository, JournalRepositoryError};
use crate::domain::{JournalEntry, JournalEntryId, Mood, Severity, UserId};

use super::models::{JournalEntryRow, NewJournalEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::journal_entries;

/// Diesel-backed implementation of the `JournalRepository` port.
#[derive(Clone)]
pub struct DieselJournalRepository {
    pool: DbPool,
}

impl DieselJournalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain journal repository errors.
fn map_pool_error(error: PoolError) -> JournalRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            JournalRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain journal repository errors.
fn map_diesel_error(error: diesel::result::Error) -> JournalRepositoryError {
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
        DieselError::NotFound => JournalRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            JournalRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => JournalRepositoryError::query("database error"),
        _ => JournalRepositoryError::query("database error"),
    }
}

/// Clamp a stored score into the 0-10 domain range.
fn score_from_db(value: i32, field: &str, entry_id: uuid::Uuid) -> Severity {
    let clamped = value.clamp(0, 10);
    if clamped != value {
        tracing::warn!(
            value,
            field,
            entry_id = %entry_id,
            "score outside 0-10 range, clamping"
        );
    }
    #[expect(
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation,
        reason = "value is clamped to 0-10 above"
    )]
    let clamped = clamped as u8;
    Severity::new(clamped).unwrap_or_else(|err| {
        panic!("clamped score must be in range: {err}");
    })
}

/// Convert a database row to a domain JournalEntry.
fn row_to_entry(row: JournalEntryRow) -> JournalEntry {
    let mood = Mood::from_str(&row.mood).unwrap_or_else(|_| {
        tracing::warn!(
            value = %row.mood,
            entry_id = %row.id,
            "unrecognised mood value, defaulting to Neutral"
        );
        Mood::Neutral
    });

    JournalEntry {
        id: JournalEntryId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        mood,
        notes: row.notes,
        sleep_quality: score_from_db(row.sleep_quality, "sleep_quality", row.id),
        stress_level: score_from_db(row.stress_level, "stress_level", row.id),
        image_url: row.image_url,
        created_at: row.created_at,
    }
}

#[async_trait]
impl JournalRepository for DieselJournalRepository {
    async fn insert(&self, entry: &JournalEntry) -> Result<(), JournalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewJournalEntryRow {
            id: *entry.id.as_uuid(),
            user_id: *entry.user_id.as_uuid(),
            mood: entry.mood.as_str(),
            notes: &entry.notes,
            sleep_quality: i32::from(entry.sleep_quality.value()),
            stress_level: i32::from(entry.stress_level.value()),
            image_url: entry.image_url.as_deref(),
            created_at: entry.created_at,
        };

        diesel::insert_into(journal_entries::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JournalEntry>, JournalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JournalEntryRow> = journal_entries::table
            .filter(journal_entries::user_id.eq(user_id.as_uuid()))
            .order(journal_entries::created_at.desc())
            .select(JournalEntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn row() -> JournalEntryRow {
        JournalEntryRow {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            mood: "stressed".to_owned(),
            notes: "breakout along the jawline".to_owned(),
            sleep_quality: 4,
            stress_level: 8,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn well_formed_rows_convert_fully() {
        let entry = row_to_entry(row());

        assert_eq!(entry.mood, Mood::Stressed);
        assert_eq!(entry.sleep_quality.value(), 4);
        assert_eq!(entry.stress_level.value(), 8);
    }

    #[rstest]
    fn unknown_moods_default_to_neutral() {
        let mut corrupt = row();
        corrupt.mood = "melancholy".to_owned();

        let entry = row_to_entry(corrupt);
        assert_eq!(entry.mood, Mood::Neutral);
    }

    #[rstest]
    #[case(-3, 0)]
    #[case(99, 10)]
    fn out_of_range_scores_are_clamped(#[case] stored: i32, #[case] expected: u8) {
        let mut corrupt = row();
        corrupt.sleep_quality = stored;

        let entry = row_to_entry(corrupt);
        assert_eq!(entry.sleep_quality.value(), expected);
    }
}
