//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer
//! - **Schemas**: Request/response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::analyses::{AnalysisResponse, SubmitAnalysisBody};
use crate::inbound::http::journal::{CreateJournalEntryRequest, JournalEntryResponse};
use crate::inbound::http::knowledge::KnowledgeArticleResponse;
use crate::inbound::http::routines::RoutinePlanResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::subscription::{SubscriptionResponse, UpdateSubscriptionRequest};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SkinInsight backend API",
        description = "HTTP interface for skin analyses, personalised routines, and account management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::analyses::submit_analysis,
        crate::inbound::http::analyses::list_analyses,
        crate::inbound::http::analyses::get_analysis,
        crate::inbound::http::routines::get_routines,
        crate::inbound::http::subscription::get_subscription,
        crate::inbound::http::subscription::update_subscription,
        crate::inbound::http::journal::create_journal_entry,
        crate::inbound::http::journal::list_journal_entries,
        crate::inbound::http::knowledge::list_knowledge_articles,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        UserResponse,
        SubmitAnalysisBody,
        AnalysisResponse,
        RoutinePlanResponse,
        SubscriptionResponse,
        UpdateSubscriptionRequest,
        CreateJournalEntryRequest,
        JournalEntryResponse,
        KnowledgeArticleResponse,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "analyses", description = "Skin analysis uploads and history"),
        (name = "routines", description = "Personalised routine derivation"),
        (name = "subscription", description = "Subscription tiers and premium status"),
        (name = "journal", description = "Daily skin journal"),
        (name = "knowledge", description = "Knowledge base catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/register",
            "/api/v1/login",
            "/api/v1/logout",
            "/api/v1/users/me",
            "/api/v1/analyses",
            "/api/v1/analyses/{id}",
            "/api/v1/routines",
            "/api/v1/subscription",
            "/api/v1/journal",
            "/api/v1/knowledge",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components registered");
        assert!(
            components.schemas.keys().any(|name| name.ends_with("Error")),
            "error schema missing from components"
        );
    }
}
