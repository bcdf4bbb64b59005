//! Skin journal entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Severity, UserId};

/// Self-reported mood attached to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Stressed,
    Tired,
    Energetic,
}

impl Mood {
    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Stressed => "stressed",
            Self::Tired => "tired",
            Self::Energetic => "energetic",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown mood string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoodError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseMoodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown mood: {}", self.input)
    }
}

impl std::error::Error for ParseMoodError {}

impl std::str::FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Self::Happy),
            "neutral" => Ok(Self::Neutral),
            "stressed" => Ok(Self::Stressed),
            "tired" => Ok(Self::Tired),
            "energetic" => Ok(Self::Energetic),
            _ => Err(ParseMoodError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Stable journal entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalEntryId(Uuid);

impl JournalEntryId {
    /// Generate a new random [`JournalEntryId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct a [`JournalEntryId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for JournalEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One daily skin journal entry.
///
/// Sleep quality and stress level reuse the 0–10 [`Severity`] scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct JournalEntry {
    /// Stable entry identifier.
    pub id: JournalEntryId,
    /// Owner of the entry.
    pub user_id: UserId,
    /// Self-reported mood.
    pub mood: Mood,
    /// Free-form notes.
    pub notes: String,
    /// Sleep quality, 0 (worst) to 10 (best).
    pub sleep_quality: Severity,
    /// Stress level, 0 (none) to 10 (worst).
    pub stress_level: Severity,
    /// Optional progress photo reference.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create a builder for constructing an entry incrementally.
    pub fn builder(user_id: UserId) -> JournalEntryBuilder {
        JournalEntryBuilder::new(user_id)
    }
}

/// Builder for constructing [`JournalEntry`] instances incrementally.
#[derive(Debug, Clone)]
pub struct JournalEntryBuilder {
    id: Option<JournalEntryId>,
    user_id: UserId,
    mood: Mood,
    notes: String,
    sleep_quality: Severity,
    stress_level: Severity,
    image_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl JournalEntryBuilder {
    /// Create a new builder for the given owner.
    ///
    /// Defaults: neutral mood, empty notes, midpoint sleep and stress
    /// scores, no photo.
    pub fn new(user_id: UserId) -> Self {
        let midpoint = Severity::new(5).unwrap_or_else(|err| {
            panic!("midpoint severity must be in range: {err}");
        });
        Self {
            id: None,
            user_id,
            mood: Mood::default(),
            notes: String::new(),
            sleep_quality: midpoint,
            stress_level: midpoint,
            image_url: None,
            created_at: None,
        }
    }

    /// Set the entry identifier.
    pub fn id(mut self, id: JournalEntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the mood.
    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the sleep quality score.
    pub fn sleep_quality(mut self, score: Severity) -> Self {
        self.sleep_quality = score;
        self
    }

    /// Set the stress level score.
    pub fn stress_level(mut self, score: Severity) -> Self {
        self.stress_level = score;
        self
    }

    /// Attach a progress photo reference.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the creation timestamp.
    pub fn created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Build the final [`JournalEntry`] instance.
    pub fn build(self) -> JournalEntry {
        JournalEntry {
            id: self.id.unwrap_or_else(JournalEntryId::random),
            user_id: self.user_id,
            mood: self.mood,
            notes: self.notes,
            sleep_quality: self.sleep_quality,
            stress_level: self.stress_level,
            image_url: self.image_url,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn mood_round_trips_through_strings() {
        for mood in [
            Mood::Happy,
            Mood::Neutral,
            Mood::Stressed,
            Mood::Tired,
            Mood::Energetic,
        ] {
            let parsed: Mood = mood.as_str().parse().expect("round-trip");
            assert_eq!(parsed, mood);
        }
    }

    #[rstest]
    #[case::capitalised("Happy")]
    #[case::unknown("melancholy")]
    fn mood_rejects_unknown_strings(#[case] input: &str) {
        let result: Result<Mood, _> = input.parse();
        assert!(result.is_err());
    }

    #[rstest]
    fn builder_defaults_match_the_entry_form() {
        let entry = JournalEntry::builder(UserId::random()).build();

        assert_eq!(entry.mood, Mood::Neutral);
        assert_eq!(entry.sleep_quality.value(), 5);
        assert_eq!(entry.stress_level.value(), 5);
        assert!(entry.notes.is_empty());
        assert!(entry.image_url.is_none());
    }

    #[rstest]
    fn entry_serialises_to_camel_case() {
        let entry = JournalEntry::builder(UserId::random())
            .mood(Mood::Energetic)
            .notes("skin felt calm today")
            .sleep_quality(Severity::new(8).expect("in range"))
            .build();

        let value = serde_json::to_value(&entry).expect("serialise");
        assert_eq!(
            value.get("mood").and_then(|v| v.as_str()),
            Some("energetic")
        );
        assert_eq!(value.get("sleepQuality"), Some(&serde_json::json!(8)));
    }
}
