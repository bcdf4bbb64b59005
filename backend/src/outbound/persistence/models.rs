//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{journal_entries, knowledge_articles, skin_analyses, subscriptions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Subscription models
// ---------------------------------------------------------------------------

/// Row struct for reading from the subscriptions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SubscriptionRow {
    pub user_id: Uuid,
    pub tier: String,
    pub status: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable/changeset struct for upserting subscription records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
pub(crate) struct SubscriptionUpsert<'a> {
    pub user_id: Uuid,
    pub tier: &'a str,
    pub status: &'a str,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Skin analysis models
// ---------------------------------------------------------------------------

/// Row struct for reading from the skin_analyses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = skin_analyses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SkinAnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: String,
    pub ai_results: serde_json::Value,
    pub skin_type: String,
    pub detected_issues: Vec<String>,
    pub severity_scores: serde_json::Value,
    pub recommendations: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new analysis records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skin_analyses)]
pub(crate) struct NewSkinAnalysisRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: &'a str,
    pub ai_results: &'a serde_json::Value,
    pub skin_type: &'a str,
    pub detected_issues: Vec<String>,
    pub severity_scores: &'a serde_json::Value,
    pub recommendations: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Journal models
// ---------------------------------------------------------------------------

/// Row struct for reading from the journal_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = journal_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JournalEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub notes: String,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new journal entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = journal_entries)]
pub(crate) struct NewJournalEntryRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: &'a str,
    pub notes: &'a str,
    pub sleep_quality: i32,
    pub stress_level: i32,
    pub image_url: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Knowledge models
// ---------------------------------------------------------------------------

/// Row struct for reading from the knowledge_articles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = knowledge_articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct KnowledgeArticleRow {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub premium_only: bool,
}
