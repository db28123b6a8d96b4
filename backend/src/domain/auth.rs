//! Authentication primitives: login credentials, registration and profile
//! edits.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, Error, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when sign-in or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Name was blank.
    Name(UserValidationError),
    /// Email was blank or malformed.
    Email(UserValidationError),
    /// Password was blank.
    EmptyPassword,
    /// Registration password was shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
    /// Registration confirmation did not match the password.
    PasswordMismatch,
}

impl AuthValidationError {
    /// Form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::PasswordMismatch => "confirmPassword",
        }
    }

    /// Machine-readable validation code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Name(_) => "empty_name",
            Self::Email(UserValidationError::InvalidEmail) => "invalid_email",
            Self::Email(_) => "empty_email",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(inner) | Self::Email(inner) => write!(f, "{inner}"),
            Self::EmptyPassword => write!(f, "password is required"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl From<AuthValidationError> for Error {
    fn from(value: AuthValidationError) -> Self {
        Self::validation(value.field(), value.code(), value.to_string())
    }
}

/// Validated login credentials used by credential verifiers.
///
/// ## Invariants
/// - `email` matches the email pattern once trimmed, but is kept exactly as
///   submitted so verifiers compare it verbatim.
/// - `password` is non-empty and also kept verbatim.
///
/// # Examples
/// ```
/// use evo_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@evoexpress.com", "password").unwrap();
/// assert_eq!(creds.email(), " admin@evoexpress.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        EmailAddress::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email exactly as submitted.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated mock-registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    ///
    /// `confirm_password` is optional; when supplied it must equal `password`.
    ///
    /// # Examples
    /// ```
    /// use evo_backend::domain::{AuthValidationError, Registration};
    ///
    /// let err = Registration::try_from_parts("Ana", "ana@example.com", "short", None)
    ///     .unwrap_err();
    /// assert_eq!(err, AuthValidationError::PasswordTooShort { min: 8 });
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: Option<&str>,
    ) -> Result<Self, AuthValidationError> {
        let name = DisplayName::new(name).map_err(AuthValidationError::Name)?;
        let email = EmailAddress::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if confirm_password.is_some_and(|confirm| confirm != password) {
            return Err(AuthValidationError::PasswordMismatch);
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Name for the new account.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Email for the new account.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Chosen password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated profile edit for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: DisplayName,
    email: EmailAddress,
}

impl ProfileUpdate {
    /// Construct a profile edit from raw form inputs.
    pub fn try_from_parts(name: &str, email: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            name: DisplayName::new(name).map_err(AuthValidationError::Name)?,
            email: EmailAddress::new(email).map_err(AuthValidationError::Email)?,
        })
    }

    /// Split into the validated name and email.
    #[must_use]
    pub fn into_parts(self) -> (DisplayName, EmailAddress) {
        (self.name, self.email)
    }
}
