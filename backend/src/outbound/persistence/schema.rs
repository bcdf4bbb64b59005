//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users keyed by UUID v4; emails carry a unique
    /// constraint.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email address (unique).
        email -> Varchar,
        /// Human-readable display name (max 32 characters).
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subscription records, at most one per user.
    subscriptions (user_id) {
        /// Primary key: the owning user.
        user_id -> Uuid,
        /// Paid tier (`free`, `premium`, `professional`).
        tier -> Varchar,
        /// Lifecycle state (`active`, `inactive`, `canceled`, `trial`).
        status -> Varchar,
        /// Optional expiry; NULL means no fixed end.
        expires_at -> Nullable<Timestamptz>,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Completed skin analyses, append-only.
    skin_analyses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Location of the analysed photo in object storage.
        image_url -> Text,
        /// Open map of raw engine outputs.
        ai_results -> Jsonb,
        /// Skin type classification string.
        skin_type -> Varchar,
        /// Canonical issue tag strings, in engine order.
        detected_issues -> Array<Text>,
        /// Per-attribute severity scores (attribute -> 0-10).
        severity_scores -> Jsonb,
        /// Product/routine/tip suggestions.
        recommendations -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Daily skin journal entries.
    journal_entries (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Self-reported mood string.
        mood -> Varchar,
        /// Free-form notes.
        notes -> Text,
        /// Sleep quality, 0-10.
        sleep_quality -> Int4,
        /// Stress level, 0-10.
        stress_level -> Int4,
        /// Optional progress photo reference.
        image_url -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Knowledge base catalogue, seeded by content tooling.
    knowledge_articles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Headline shown in listings.
        title -> Text,
        /// Topic category.
        category -> Varchar,
        /// Short teaser shown in listings.
        summary -> Text,
        /// Whether only premium readers may see the article.
        premium_only -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    subscriptions,
    skin_analyses,
    journal_entries,
    knowledge_articles,
);
