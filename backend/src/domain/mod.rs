//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the pure routine deriver, and the services that
//! implement the driving ports. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.

mod account;
mod analysis;
mod analysis_service;
pub mod error;
mod journal;
mod knowledge;
pub mod ports;
mod premium;
mod routine;
mod routine_service;
mod skin;
mod subscription;
mod user;

pub use self::account::AccountService;
pub use self::analysis::{
    AnalysisId, Recommendations, Severity, SeverityOutOfRange, SeverityScores, SkinAnalysis,
    SkinAnalysisBuilder, OVERALL_HEALTH_KEY, SEVERITY_MAX,
};
pub use self::analysis_service::AnalysisService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::journal::{
    JournalEntry, JournalEntryBuilder, JournalEntryId, Mood, ParseMoodError,
};
pub use self::knowledge::{ArticleId, KnowledgeArticle};
pub use self::premium::PremiumService;
pub use self::routine::{default_plan, derive_plan, RoutinePlan};
pub use self::routine_service::RoutineService;
pub use self::skin::{IssueTag, ParseIssueTagError, ParseSkinTypeError, SkinType};
pub use self::subscription::{
    ParseSubscriptionStatusError, ParseSubscriptionTierError, Subscription, SubscriptionStatus,
    SubscriptionTier,
};
pub use self::user::{
    DisplayName, EmailAddress, User, UserId, UserValidationError, DISPLAY_NAME_MAX,
    DISPLAY_NAME_MIN, EMAIL_MAX,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
