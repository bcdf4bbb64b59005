//! Collaborator port for the skin analysis engine.
//!
//! The real engine is an external AI service; the application only depends
//! on this trait. The fixture implementation returns a representative
//! assessment so the rest of the system can run without the service.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{
    IssueTag, Recommendations, Severity, SeverityScores, SkinType, UserId, OVERALL_HEALTH_KEY,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by analysis engine adapters.
    pub enum AnalysisEngineError {
        /// The engine could not be reached.
        Unavailable { message: String } =>
            "analysis engine unavailable: {message}",
        /// The engine rejected the submitted image.
        Rejected { message: String } =>
            "analysis engine rejected the image: {message}",
    }
}

/// Assessment produced by the engine for one uploaded photo.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisAssessment {
    /// Open map of raw engine outputs.
    pub ai_results: BTreeMap<String, serde_json::Value>,
    /// Skin type classification.
    pub skin_type: SkinType,
    /// Detected issues, in engine order.
    pub detected_issues: Vec<IssueTag>,
    /// Per-attribute severity scores.
    pub severity_scores: SeverityScores,
    /// Suggested products, routines, and tips.
    pub recommendations: Recommendations,
}

/// Port for obtaining an assessment of an uploaded photo.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    /// Assess the photo at `image_url` for the given user.
    async fn assess(
        &self,
        user_id: &UserId,
        image_url: &str,
    ) -> Result<AnalysisAssessment, AnalysisEngineError>;
}

/// Fixture engine returning a fixed representative assessment.
///
/// The payload mirrors a typical combination-skin result: mild acne, some
/// dryness, slightly uneven texture, and a healthy overall score.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnalysisEngine;

impl FixtureAnalysisEngine {
    fn fixture_scores() -> SeverityScores {
        let mut scores = SeverityScores::new();
        for (attribute, value) in [
            ("acne", 3),
            ("dryness", 4),
            ("unevenTexture", 2),
            (OVERALL_HEALTH_KEY, 7),
        ] {
            match Severity::new(value) {
                Ok(severity) => scores.set(attribute, severity),
                Err(err) => panic!("fixture severity must be in range: {err}"),
            }
        }
        scores
    }
}

#[async_trait]
impl AnalysisEngine for FixtureAnalysisEngine {
    async fn assess(
        &self,
        _user_id: &UserId,
        _image_url: &str,
    ) -> Result<AnalysisAssessment, AnalysisEngineError> {
        let mut ai_results = BTreeMap::new();
        ai_results.insert("skinTone".to_owned(), json!("medium"));
        ai_results.insert("skinCondition".to_owned(), json!("good"));

        Ok(AnalysisAssessment {
            ai_results,
            skin_type: SkinType::Combination,
            detected_issues: vec![IssueTag::Acne, IssueTag::Dryness, IssueTag::UnevenTexture],
            severity_scores: Self::fixture_scores(),
            recommendations: Recommendations {
                products: vec![
                    "Gentle cleanser".to_owned(),
                    "Hyaluronic acid serum".to_owned(),
                    "Oil-free moisturizer".to_owned(),
                ],
                routines: vec![
                    "Double cleansing in the evening".to_owned(),
                    "Hydrating routine in the morning".to_owned(),
                ],
                tips: vec![
                    "Drink more water".to_owned(),
                    "Use sunscreen daily".to_owned(),
                    "Avoid touching face".to_owned(),
                ],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_engine_returns_a_complete_assessment() {
        let engine = FixtureAnalysisEngine;
        let assessment = engine
            .assess(&UserId::random(), "s3://photos/1.jpg")
            .await
            .expect("fixture assessment should succeed");

        assert_eq!(assessment.skin_type, SkinType::Combination);
        assert_eq!(
            assessment.detected_issues,
            vec![IssueTag::Acne, IssueTag::Dryness, IssueTag::UnevenTexture]
        );
        assert_eq!(assessment.severity_scores.overall_health_percent(), Some(70));
        assert!(!assessment.recommendations.products.is_empty());
    }
}
