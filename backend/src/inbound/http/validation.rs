//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{AnalysisId, Error, Severity};

/// Reject a request missing a required field.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Reject an unparseable enum-valued field, listing the accepted values.
pub(crate) fn invalid_value_error(field: &str, value: &str, accepted: &[&str]) -> Error {
    Error::invalid_request(format!("{field} must be one of: {}", accepted.join(", ")))
        .with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_value",
        }))
}

/// Parse a 0–10 score field.
pub(crate) fn parse_score(field: &str, value: u8) -> Result<Severity, Error> {
    Severity::new(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": field,
            "value": value,
            "code": "score_out_of_range",
        }))
    })
}

/// Parse an analysis id supplied in a path or query segment.
pub(crate) fn parse_analysis_id(field: &str, value: &str) -> Result<AnalysisId, Error> {
    value.parse().map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_uuid",
        }))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn detail(error: &Error, key: &str) -> Option<String> {
        error
            .details()
            .and_then(|value| value.get(key))
            .and_then(|value| value.as_str())
            .map(ToOwned::to_owned)
    }

    #[rstest]
    fn missing_field_errors_name_the_field() {
        let error = missing_field_error("imageUrl");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field").as_deref(), Some("imageUrl"));
        assert_eq!(detail(&error, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    fn invalid_value_errors_list_the_accepted_values() {
        let error = invalid_value_error("mood", "melancholy", &["happy", "neutral"]);
        assert!(error.message().contains("happy, neutral"));
        assert_eq!(detail(&error, "value").as_deref(), Some("melancholy"));
    }

    #[rstest]
    #[case(0, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn scores_are_range_checked(#[case] value: u8, #[case] ok: bool) {
        assert_eq!(parse_score("sleepQuality", value).is_ok(), ok);
    }

    #[rstest]
    fn analysis_ids_must_be_uuids() {
        assert!(parse_analysis_id("analysisId", "3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
        let error = parse_analysis_id("analysisId", "not-a-uuid").expect_err("invalid uuid");
        assert_eq!(detail(&error, "code").as_deref(), Some("invalid_uuid"));
    }
}
