//! Skin journal HTTP handlers.
//!
//! ```text
//! POST /api/v1/journal {"mood":"neutral","notes":"...","sleepQuality":5,"stressLevel":5}
//! GET  /api/v1/journal
//! ```

use std::str::FromStr;

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::JournalRepositoryError;
use crate::domain::{Error, JournalEntry, Mood};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error, parse_score};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/journal`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalEntryRequest {
    pub mood: Option<String>,
    pub notes: Option<String>,
    pub sleep_quality: Option<u8>,
    pub stress_level: Option<u8>,
    pub image_url: Option<String>,
}

/// Response payload for one journal entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryResponse {
    pub id: String,
    pub mood: String,
    pub notes: String,
    pub sleep_quality: u8,
    pub stress_level: u8,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(value: JournalEntry) -> Self {
        Self {
            id: value.id.to_string(),
            mood: value.mood.to_string(),
            notes: value.notes,
            sleep_quality: value.sleep_quality.value(),
            stress_level: value.stress_level.value(),
            image_url: value.image_url,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

fn map_journal_repository_error(error: JournalRepositoryError) -> Error {
    match error {
        JournalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("journal repository unavailable: {message}"))
        }
        JournalRepositoryError::Query { message } => {
            Error::internal(format!("journal repository error: {message}"))
        }
    }
}

const ACCEPTED_MOODS: [&str; 5] = ["happy", "neutral", "stressed", "tired", "energetic"];

fn parse_entry(
    user_id: crate::domain::UserId,
    payload: CreateJournalEntryRequest,
) -> Result<JournalEntry, Error> {
    let mood_raw = payload.mood.ok_or_else(|| missing_field_error("mood"))?;
    let mood = Mood::from_str(&mood_raw)
        .map_err(|_| invalid_value_error("mood", &mood_raw, &ACCEPTED_MOODS))?;
    let sleep_quality = payload
        .sleep_quality
        .ok_or_else(|| missing_field_error("sleepQuality"))
        .and_then(|value| parse_score("sleepQuality", value))?;
    let stress_level = payload
        .stress_level
        .ok_or_else(|| missing_field_error("stressLevel"))
        .and_then(|value| parse_score("stressLevel", value))?;

    let mut builder = JournalEntry::builder(user_id)
        .mood(mood)
        .notes(payload.notes.unwrap_or_default())
        .sleep_quality(sleep_quality)
        .stress_level(stress_level);
    if let Some(url) = payload.image_url.filter(|url| !url.trim().is_empty()) {
        builder = builder.image_url(url);
    }

    Ok(builder.build())
}

/// Create a journal entry for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/journal",
    request_body = CreateJournalEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = JournalEntryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["journal"],
    operation_id = "createJournalEntry"
)]
#[post("/journal")]
pub async fn create_journal_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateJournalEntryRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let entry = parse_entry(user_id, payload.into_inner())?;

    state
        .journal
        .insert(&entry)
        .await
        .map_err(map_journal_repository_error)?;

    Ok(HttpResponse::Created().json(JournalEntryResponse::from(entry)))
}

/// List the authenticated user's journal entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/journal",
    responses(
        (status = 200, description = "Journal entries", body = [JournalEntryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["journal"],
    operation_id = "listJournalEntries"
)]
#[get("/journal")]
pub async fn list_journal_entries(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<JournalEntryResponse>>> {
    let user_id = session.require_user_id()?;
    let entries = state
        .journal
        .list_for_user(&user_id)
        .await
        .map_err(map_journal_repository_error)?;

    Ok(web::Json(
        entries.into_iter().map(JournalEntryResponse::from).collect(),
    ))
}
