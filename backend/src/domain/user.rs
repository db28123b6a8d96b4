//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain whitespace"),
            Self::EmptyName => write!(f, "name is required"),
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "invalid email address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier such as `admin-123` or `user-k3j9x0a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::UserId;
    ///
    /// assert!(UserId::new("user-456").is_ok());
    /// assert!(UserId::new("user 456").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable name shown on dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`]; surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
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
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address accepted by the sign-in and parcel forms.
///
/// Stored trimmed with its case preserved. Sign-in compares the raw
/// submitted text instead; see [`super::LoginCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`]; surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("juan@example.com").is_ok());
    /// assert!(EmailAddress::new("juan@example").is_err());
    /// ```
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
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
        Self::new(value)
    }
}

/// Access-level tag deciding which views and actions are permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer who creates and tracks their own parcels.
    User,
    /// Operator who approves parcels and advances their status.
    Admin,
}

/// Application user held in the session.
///
/// ## Invariants
/// - `id` is non-empty and free of whitespace.
/// - `name` is non-empty once trimmed.
/// - `email` matches the form email pattern.
///
/// Serialises to `{id, name, email, role}`, the shape stored under the
/// `evo-user` session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "user-456")]
    id: UserId,
    #[schema(value_type = String, example = "Regular User")]
    name: DisplayName,
    #[schema(value_type = String, example = "user@example.com")]
    email: EmailAddress,
    role: Role,
}

impl User {
    /// Build a new [`User`] from validated components.
    #[must_use]
    pub const fn new(id: UserId, name: DisplayName, email: EmailAddress, role: Role) -> Self {
        Self {
            id,
            name,
            email,
            role,
        }
    }

    /// Fallible constructor enforcing all field invariants.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::{Role, User};
    ///
    /// let admin = User::try_from_strings("admin-123", "Admin User", "admin@evoexpress.com", Role::Admin)
    ///     .expect("valid user");
    /// assert!(admin.is_admin());
    /// ```
    pub fn try_from_strings(
        id: impl Into<String>,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            DisplayName::new(name)?,
            EmailAddress::new(email)?,
            role,
        ))
    }

    /// Stable user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Name shown on dashboards.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Contact email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Access-level tag.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the user may use administrator actions.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Return a copy with a new name and email, keeping id and role.
    #[must_use]
    pub fn with_profile(self, name: DisplayName, email: EmailAddress) -> Self {
        Self {
            name,
            email,
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: String,
    email: String,
    role: Role,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
        } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_from_strings(value.id, value.name, value.email, value.role)
    }
}
