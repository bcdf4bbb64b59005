//! Account and session HTTP handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.com","displayName":"Ada","password":"..."}
//! POST /api/v1/login {"email":"ada@example.com","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! ```
//!
//! Password verification belongs to the external identity provider; the
//! handlers only require the field to be present so the request shape
//! matches the client forms.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{RegisterUserRequest, UserRepositoryError};
use crate::domain::{DisplayName, EmailAddress, Error, User, UserValidationError};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response payload describing the authenticated user.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: String,
    pub is_premium: bool,
}

impl UserResponse {
    fn from_user(user: &User, is_premium: bool) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            display_name: user.display_name().to_string(),
            created_at: user.created_at().to_rfc3339(),
            is_premium,
        }
    }
}

fn map_validation_error(field: &str, err: &UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": "invalid_value",
    }))
}

fn parse_email(raw: String) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err| map_validation_error("email", &err))
}

fn parse_display_name(raw: String) -> Result<DisplayName, Error> {
    DisplayName::new(raw).map_err(|err| map_validation_error("displayName", &err))
}

fn require_password(raw: &str) -> Result<(), Error> {
    if raw.is_empty() {
        return Err(
            Error::invalid_request("password must not be empty").with_details(json!({
                "field": "password",
                "code": "empty_password",
            })),
        );
    }
    Ok(())
}

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("an account already exists for {email}"))
        }
    }
}

/// Create an account and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        display_name,
        password,
    } = payload.into_inner();
    require_password(&password)?;
    let request = RegisterUserRequest {
        email: parse_email(email)?,
        display_name: parse_display_name(display_name)?,
    };

    let user = state.login.register(request).await?;
    session.persist_user(user.id())?;

    let is_premium = state.premium.is_premium_user(user.id()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from_user(&user, is_premium)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    require_password(&password)?;
    let email = parse_email(email)?;

    let user = state.login.authenticate(&email).await?;
    session.persist_user(user.id())?;

    let is_premium = state.premium.is_premium_user(user.id()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from_user(&user, is_premium)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated user with their derived premium flag.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(map_user_repository_error)?
        .ok_or_else(|| Error::unauthorized("session user no longer exists"))?;

    let is_premium = state.premium.is_premium_user(&user_id).await?;
    Ok(web::Json(UserResponse::from_user(&user, is_premium)))
}
