//! Skin analysis HTTP handlers.
//!
//! ```text
//! POST /api/v1/analyses {"imageUrl":"https://..."}
//! GET  /api/v1/analyses
//! GET  /api/v1/analyses/{id}
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubmitAnalysisRequest;
use crate::domain::SkinAnalysis;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_analysis_id};
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/analyses`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnalysisBody {
    /// Location of the uploaded photo; the upload itself goes straight to
    /// object storage.
    pub image_url: Option<String>,
}

/// Response payload for one analysis.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: String,
    pub image_url: String,
    pub ai_results: serde_json::Value,
    pub skin_type: String,
    pub detected_issues: Vec<String>,
    pub severity_scores: serde_json::Value,
    /// Overall health as a percentage, when the engine scored it.
    pub overall_health_percent: Option<u8>,
    pub products: Vec<String>,
    pub routines: Vec<String>,
    pub tips: Vec<String>,
    pub created_at: String,
}

impl From<SkinAnalysis> for AnalysisResponse {
    fn from(value: SkinAnalysis) -> Self {
        let overall_health_percent = value.severity_scores.overall_health_percent();
        Self {
            id: value.id.to_string(),
            image_url: value.image_url,
            ai_results: serde_json::Value::Object(value.ai_results.into_iter().collect()),
            skin_type: value.skin_type.to_string(),
            detected_issues: value
                .detected_issues
                .iter()
                .map(|tag| tag.as_str().to_owned())
                .collect(),
            severity_scores: value
                .severity_scores
                .iter()
                .map(|(attribute, severity)| {
                    (
                        attribute.to_owned(),
                        serde_json::Value::from(severity.value()),
                    )
                })
                .collect::<serde_json::Map<_, _>>()
                .into(),
            overall_health_percent,
            products: value.recommendations.products,
            routines: value.recommendations.routines,
            tips: value.recommendations.tips,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

/// Submit an uploaded photo for analysis.
#[utoipa::path(
    post,
    path = "/api/v1/analyses",
    request_body = SubmitAnalysisBody,
    responses(
        (status = 201, description = "Analysis created", body = AnalysisResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Analysis engine unavailable", body = ErrorSchema)
    ),
    tags = ["analyses"],
    operation_id = "submitAnalysis"
)]
#[post("/analyses")]
pub async fn submit_analysis(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitAnalysisBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let image_url = payload
        .into_inner()
        .image_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| missing_field_error("imageUrl"))?;

    let analysis = state
        .analyses
        .submit(SubmitAnalysisRequest { user_id, image_url })
        .await?;

    Ok(HttpResponse::Created().json(AnalysisResponse::from(analysis)))
}

/// List the authenticated user's analyses, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/analyses",
    responses(
        (status = 200, description = "Analyses", body = [AnalysisResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["analyses"],
    operation_id = "listAnalyses"
)]
#[get("/analyses")]
pub async fn list_analyses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AnalysisResponse>>> {
    let user_id = session.require_user_id()?;
    let analyses = state.analyses_query.list_for_user(&user_id).await?;
    Ok(web::Json(
        analyses.into_iter().map(AnalysisResponse::from).collect(),
    ))
}

/// Fetch one of the authenticated user's analyses.
#[utoipa::path(
    get,
    path = "/api/v1/analyses/{id}",
    params(("id" = String, Path, description = "Analysis id")),
    responses(
        (status = 200, description = "Analysis", body = AnalysisResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["analyses"],
    operation_id = "getAnalysis"
)]
#[get("/analyses/{id}")]
pub async fn get_analysis(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnalysisResponse>> {
    let user_id = session.require_user_id()?;
    let analysis_id = parse_analysis_id("id", &path.into_inner())?;

    let analysis = state.analyses_query.get(&user_id, &analysis_id).await?;
    Ok(web::Json(AnalysisResponse::from(analysis)))
}
