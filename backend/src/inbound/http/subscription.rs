//! Subscription HTTP handlers.
//!
//! ```text
//! GET /api/v1/subscription
//! PUT /api/v1/subscription {"tier":"premium"}
//! ```
//!
//! Tier changes take effect immediately; payment handling is the external
//! billing provider's concern.

use std::str::FromStr;

use actix_web::{get, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubscriptionRepositoryError;
use crate::domain::{Error, Subscription, SubscriptionStatus, SubscriptionTier};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{invalid_value_error, missing_field_error};
use crate::inbound::http::ApiResult;

/// Request body for `PUT /api/v1/subscription`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    pub tier: Option<String>,
}

/// Response payload describing the caller's subscription.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub tier: String,
    pub status: String,
    pub expires_at: Option<String>,
    pub is_premium: bool,
}

impl SubscriptionResponse {
    fn from_subscription(subscription: &Subscription) -> Self {
        Self {
            tier: subscription.tier.to_string(),
            status: subscription.status.to_string(),
            expires_at: subscription.expires_at.map(|ts| ts.to_rfc3339()),
            is_premium: subscription.grants_premium(Utc::now()),
        }
    }
}

fn map_subscription_repository_error(error: SubscriptionRepositoryError) -> Error {
    match error {
        SubscriptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("subscription repository unavailable: {message}"))
        }
        SubscriptionRepositoryError::Query { message } => {
            Error::internal(format!("subscription repository error: {message}"))
        }
    }
}

fn parse_tier(payload: UpdateSubscriptionRequest) -> Result<SubscriptionTier, Error> {
    let raw = payload.tier.ok_or_else(|| missing_field_error("tier"))?;
    SubscriptionTier::from_str(&raw)
        .map_err(|_| invalid_value_error("tier", &raw, &["free", "premium", "professional"]))
}

/// Fetch the authenticated user's subscription.
///
/// Users without a stored record read as the free tier.
#[utoipa::path(
    get,
    path = "/api/v1/subscription",
    responses(
        (status = 200, description = "Subscription", body = SubscriptionResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["subscription"],
    operation_id = "getSubscription"
)]
#[get("/subscription")]
pub async fn get_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let user_id = session.require_user_id()?;
    let subscription = state
        .subscriptions
        .find_by_user_id(&user_id)
        .await
        .map_err(map_subscription_repository_error)?
        .unwrap_or_else(|| Subscription::free(user_id, Utc::now()));

    Ok(web::Json(SubscriptionResponse::from_subscription(
        &subscription,
    )))
}

/// Change the authenticated user's subscription tier.
#[utoipa::path(
    put,
    path = "/api/v1/subscription",
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Updated subscription", body = SubscriptionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["subscription"],
    operation_id = "updateSubscription"
)]
#[put("/subscription")]
pub async fn update_subscription(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateSubscriptionRequest>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let user_id = session.require_user_id()?;
    let tier = parse_tier(payload.into_inner())?;

    let status = if tier.is_paid() {
        SubscriptionStatus::Active
    } else {
        SubscriptionStatus::Inactive
    };
    let subscription = Subscription {
        user_id,
        tier,
        status,
        expires_at: None,
        updated_at: Utc::now(),
    };

    state
        .subscriptions
        .upsert(&subscription)
        .await
        .map_err(map_subscription_repository_error)?;

    Ok(web::Json(SubscriptionResponse::from_subscription(
        &subscription,
    )))
}
