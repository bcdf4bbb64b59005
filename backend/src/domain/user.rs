//! User data model.

use std::fmt;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyDisplayName,
    DisplayNameTooShort { min: usize },
    DisplayNameTooLong { max: usize },
    DisplayNameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a local part and a domain"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooShort { min } => {
                write!(f, "display name must be at least {min} characters")
            }
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    /// Construct a [`UserId`] from an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum accepted email length, per RFC 5321 limits.
pub const EMAIL_MAX: usize = 254;

/// Login identifier for the user.
///
/// Validation is structural only (a local part, an `@`, and a dotted
/// domain); deliverability is the identity provider's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from owned input.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }

        let mut parts = email.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9_ ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }

        let length = display_name.chars().count();
        if length < DISPLAY_NAME_MIN {
            return Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        if length > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }

        if !display_name_regex().is_match(&display_name) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }

        Ok(Self(display_name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` must be a valid UUID string.
/// - `email` must pass structural validation.
/// - `display_name` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    display_name: DisplayName,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        display_name: DisplayName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            created_at,
        }
    }

    /// Fallible constructor enforcing identifier, email, and display name
    /// invariants.
    ///
    /// Prefer [`User::new`] when components are already validated.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        email: impl Into<String>,
        display_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let email = EmailAddress::new(email)?;
        let display_name = DisplayName::new(display_name)?;

        Ok(Self::new(id, email, display_name, created_at))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name shown to the user.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Account creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    email: String,
    #[serde(alias = "display_name")]
    display_name: String,
    created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            display_name,
            created_at,
        } = value;
        Self {
            id: id.to_string(),
            email: email.into(),
            display_name: display_name.into(),
            created_at,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.email, value.display_name, value.created_at)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("ada@example.com")]
    #[case::subdomain("ada.lovelace@mail.example.co.uk")]
    #[case::plus_tag("ada+skincare@example.com")]
    fn email_accepts_structural_addresses(#[case] input: &str) {
        let email = EmailAddress::new(input).expect("valid email");
        assert_eq!(email.as_ref(), input);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::no_at("ada.example.com")]
    #[case::no_domain("ada@")]
    #[case::no_local("@example.com")]
    #[case::undotted_domain("ada@localhost")]
    fn email_rejects_malformed_addresses(#[case] input: &str) {
        assert!(EmailAddress::new(input).is_err());
    }

    #[rstest]
    fn email_rejects_oversized_addresses() {
        let local = "a".repeat(EMAIL_MAX);
        let input = format!("{local}@example.com");
        assert_eq!(
            EmailAddress::new(input),
            Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
        );
    }

    #[rstest]
    #[case::too_short("ab", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
    #[case::bad_chars("Ada!", UserValidationError::DisplayNameInvalidCharacters)]
    fn display_name_rejects_invalid_input(
        #[case] input: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(DisplayName::new(input), Err(expected));
    }

    #[rstest]
    fn user_id_round_trips_through_serde() {
        let id = UserId::random();
        let json = serde_json::to_string(&id).expect("serialise");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(parsed, id);
    }

    #[rstest]
    fn user_serialises_to_camel_case() {
        let user = User::try_from_strings(
            "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "ada@example.com",
            "Ada Lovelace",
            chrono::Utc::now(),
        )
        .expect("valid user");

        let value = serde_json::to_value(&user).expect("serialise");
        assert_eq!(
            value.get("displayName").and_then(|v| v.as_str()),
            Some("Ada Lovelace")
        );
        assert!(value.get("createdAt").is_some());
    }
}
