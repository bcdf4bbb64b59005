//! Skin analysis aggregate and related value types.
//!
//! A `SkinAnalysis` is created once per photo upload and is immutable
//! thereafter. It is owned by the user who created it and read by the
//! dashboard endpoints and the routine deriver.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{IssueTag, SkinType, UserId};

/// Stable analysis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(Uuid);

impl AnalysisId {
    /// Generate a new random [`AnalysisId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Construct an [`AnalysisId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AnalysisId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Upper bound of the severity scale.
pub const SEVERITY_MAX: u8 = 10;

/// A 0–10 severity value for one skin attribute.
///
/// Lower is worse for per-issue attributes; the `overallHealth` attribute
/// uses the opposite polarity (higher is better) — see
/// [`SeverityScores::overall_health_percent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

/// Error returned when a severity value is out of range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityOutOfRange {
    /// The rejected value.
    pub value: u8,
}

impl std::fmt::Display for SeverityOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "severity must be 0-{SEVERITY_MAX}, got {}", self.value)
    }
}

impl std::error::Error for SeverityOutOfRange {}

impl Severity {
    /// Validate and construct a [`Severity`].
    pub fn new(value: u8) -> Result<Self, SeverityOutOfRange> {
        if value > SEVERITY_MAX {
            return Err(SeverityOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// The raw 0–10 value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Severity {
    type Error = SeverityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(value: Severity) -> Self {
        value.0
    }
}

/// Attribute key carrying the inverted-polarity overall health score.
pub const OVERALL_HEALTH_KEY: &str = "overallHealth";

/// Per-attribute severity scores from one analysis.
///
/// Keys are open attribute names emitted by the analysis engine (for
/// example `acne`, `dryness`, `unevenTexture`, `overallHealth`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeverityScores(BTreeMap<String, Severity>);

impl SeverityScores {
    /// Create an empty score map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score for an attribute, replacing any previous value.
    pub fn set(&mut self, attribute: impl Into<String>, severity: Severity) {
        self.0.insert(attribute.into(), severity);
    }

    /// Look up the score for an attribute.
    pub fn get(&self, attribute: &str) -> Option<Severity> {
        self.0.get(attribute).copied()
    }

    /// Number of scored attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attributes are scored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attribute/score pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Severity)> {
        self.0.iter().map(|(key, severity)| (key.as_str(), *severity))
    }

    /// The overall health score as a percentage, if present.
    ///
    /// `overallHealth` shares the 0–10 scale with every other attribute but
    /// with higher-is-better polarity; this accessor is the only place the
    /// value is converted to a percentage. It is never averaged with or
    /// inverted against the per-issue severities.
    pub fn overall_health_percent(&self) -> Option<u8> {
        self.get(OVERALL_HEALTH_KEY)
            .map(|severity| severity.value() * 10)
    }
}

impl FromIterator<(String, Severity)> for SeverityScores {
    fn from_iter<I: IntoIterator<Item = (String, Severity)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Product, routine, and tip suggestions attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Suggested products.
    #[serde(default)]
    pub products: Vec<String>,
    /// Suggested routine adjustments.
    #[serde(default)]
    pub routines: Vec<String>,
    /// Lifestyle tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

/// One completed skin analysis.
///
/// ## Invariants
/// - Immutable after creation; a new upload produces a new analysis.
/// - `detected_issues` preserves the order emitted by the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysis {
    /// Stable analysis identifier.
    pub id: AnalysisId,
    /// Owner of the analysis.
    pub user_id: UserId,
    /// Location of the analysed photo in object storage.
    pub image_url: String,
    /// Open map of raw engine outputs (skin tone, condition, ...).
    pub ai_results: BTreeMap<String, serde_json::Value>,
    /// Skin type classification.
    pub skin_type: SkinType,
    /// Detected issues, in engine order.
    pub detected_issues: Vec<IssueTag>,
    /// Per-attribute severity scores.
    pub severity_scores: SeverityScores,
    /// Suggested products, routines, and tips.
    pub recommendations: Recommendations,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SkinAnalysis {
    /// Create a builder for constructing an analysis incrementally.
    pub fn builder(user_id: UserId, image_url: impl Into<String>) -> SkinAnalysisBuilder {
        SkinAnalysisBuilder::new(user_id, image_url)
    }
}

/// Builder for constructing [`SkinAnalysis`] instances incrementally.
#[derive(Debug, Clone)]
pub struct SkinAnalysisBuilder {
    id: Option<AnalysisId>,
    user_id: UserId,
    image_url: String,
    ai_results: BTreeMap<String, serde_json::Value>,
    skin_type: SkinType,
    detected_issues: Vec<IssueTag>,
    severity_scores: SeverityScores,
    recommendations: Recommendations,
    created_at: Option<DateTime<Utc>>,
}

impl SkinAnalysisBuilder {
    /// Create a new builder for the given owner and image.
    pub fn new(user_id: UserId, image_url: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            image_url: image_url.into(),
            ai_results: BTreeMap::new(),
            skin_type: SkinType::default(),
            detected_issues: Vec::new(),
            severity_scores: SeverityScores::new(),
            recommendations: Recommendations::default(),
            created_at: None,
        }
    }

    /// Set the analysis identifier.
    pub fn id(mut self, id: AnalysisId) -> Self {
        self.id = Some(id);
        self
    }

    /// Record a raw engine output value.
    pub fn ai_result(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.ai_results.insert(key.into(), value);
        self
    }

    /// Set the skin type classification.
    pub fn skin_type(mut self, skin_type: SkinType) -> Self {
        self.skin_type = skin_type;
        self
    }

    /// Set the detected issues.
    pub fn detected_issues(mut self, issues: Vec<IssueTag>) -> Self {
        self.detected_issues = issues;
        self
    }

    /// Set the severity scores.
    pub fn severity_scores(mut self, scores: SeverityScores) -> Self {
        self.severity_scores = scores;
        self
    }

    /// Set the recommendations.
    pub fn recommendations(mut self, recommendations: Recommendations) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Set the creation timestamp.
    pub fn created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Build the final [`SkinAnalysis`] instance.
    pub fn build(self) -> SkinAnalysis {
        SkinAnalysis {
            id: self.id.unwrap_or_else(AnalysisId::random),
            user_id: self.user_id,
            image_url: self.image_url,
            ai_results: self.ai_results,
            skin_type: self.skin_type,
            detected_issues: self.detected_issues,
            severity_scores: self.severity_scores,
            recommendations: self.recommendations,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn scores(pairs: &[(&str, u8)]) -> SeverityScores {
        pairs
            .iter()
            .map(|(key, value)| {
                (
                    (*key).to_owned(),
                    Severity::new(*value).expect("score in range"),
                )
            })
            .collect()
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(10)]
    fn severity_accepts_in_range_values(#[case] value: u8) {
        let severity = Severity::new(value).expect("in range");
        assert_eq!(severity.value(), value);
    }

    #[rstest]
    #[case(11)]
    #[case(255)]
    fn severity_rejects_out_of_range_values(#[case] value: u8) {
        assert_eq!(Severity::new(value), Err(SeverityOutOfRange { value }));
    }

    #[rstest]
    fn severity_serde_rejects_out_of_range() {
        let result: Result<Severity, _> = serde_json::from_str("42");
        assert!(result.is_err());
    }

    #[rstest]
    fn overall_health_is_exposed_as_percentage() {
        let scores = scores(&[("acne", 3), (OVERALL_HEALTH_KEY, 7)]);
        assert_eq!(scores.overall_health_percent(), Some(70));
    }

    #[rstest]
    fn overall_health_percent_is_none_when_unscored() {
        let scores = scores(&[("acne", 3)]);
        assert_eq!(scores.overall_health_percent(), None);
    }

    #[rstest]
    fn builder_defaults_are_sensible() {
        let user_id = UserId::random();
        let analysis = SkinAnalysis::builder(user_id.clone(), "s3://photos/1.jpg").build();

        assert_eq!(analysis.user_id, user_id);
        assert_eq!(analysis.skin_type, SkinType::Normal);
        assert!(analysis.detected_issues.is_empty());
        assert!(analysis.severity_scores.is_empty());
    }

    #[rstest]
    fn analysis_serialises_to_camel_case() {
        let analysis = SkinAnalysis::builder(UserId::random(), "s3://photos/1.jpg")
            .skin_type(SkinType::Combination)
            .detected_issues(vec![IssueTag::Acne, IssueTag::Dryness])
            .severity_scores(scores(&[("acne", 3), (OVERALL_HEALTH_KEY, 7)]))
            .ai_result("skinTone", json!("medium"))
            .build();

        let value = serde_json::to_value(&analysis).expect("serialise");
        assert_eq!(
            value.get("skinType").and_then(|v| v.as_str()),
            Some("combination")
        );
        assert_eq!(
            value.get("detectedIssues"),
            Some(&json!(["acne", "dryness"]))
        );
        assert_eq!(
            value
                .get("severityScores")
                .and_then(|v| v.get("overallHealth")),
            Some(&json!(7))
        );
    }
}
