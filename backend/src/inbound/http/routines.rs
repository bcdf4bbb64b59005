//! Personalised routine HTTP handler.
//!
//! ```text
//! GET /api/v1/routines
//! GET /api/v1/routines?analysisId=3fa85f64-...
//! ```

use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RoutinePlan;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_analysis_id;
use crate::inbound::http::ApiResult;

/// Query parameters for `GET /api/v1/routines`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinesParams {
    /// Derive from a specific analysis instead of the most recent one.
    pub analysis_id: Option<String>,
}

/// Response payload carrying the derived routine plan.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePlanResponse {
    /// Morning steps, in application order.
    pub morning: Vec<String>,
    /// Evening steps, in application order.
    pub evening: Vec<String>,
    /// Weekly treatments.
    pub weekly: Vec<String>,
}

impl From<RoutinePlan> for RoutinePlanResponse {
    fn from(value: RoutinePlan) -> Self {
        let RoutinePlan {
            morning,
            evening,
            weekly,
        } = value;
        Self {
            morning,
            evening,
            weekly,
        }
    }
}

/// Derive the authenticated user's routine plan.
///
/// Users without any analysis receive the fixed default plan; the response
/// is recomputed on every request and never cached server-side.
#[utoipa::path(
    get,
    path = "/api/v1/routines",
    params(
        ("analysisId" = Option<String>, Query, description = "Derive from a specific analysis")
    ),
    responses(
        (
            status = 200,
            description = "Derived routine plan",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = RoutinePlanResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Analysis not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["routines"],
    operation_id = "getRoutines"
)]
#[get("/routines")]
pub async fn get_routines(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<RoutinesParams>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let analysis_id = params
        .into_inner()
        .analysis_id
        .map(|raw| parse_analysis_id("analysisId", &raw))
        .transpose()?;

    let plan = state.routines.plan_for_user(&user_id, analysis_id).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, must-revalidate, no-cache"))
        .json(RoutinePlanResponse::from(plan)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_plan;
    use rstest::rstest;

    #[rstest]
    fn response_preserves_step_order() {
        let response = RoutinePlanResponse::from(default_plan());

        assert_eq!(
            response.morning,
            vec!["cleanser", "toner", "moisturizer", "sunscreen"]
        );
        assert_eq!(response.weekly, vec!["exfoliation", "hydrating mask"]);
    }
}
