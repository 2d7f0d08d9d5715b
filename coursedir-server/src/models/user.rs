//! User records and registration input
//!
//! Email addresses are normalized (trimmed, lowercased) at construction so
//! lookups and the UNIQUE constraint agree.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::FromRow;

use super::validation::{required_text, ValidationError, ValidationErrors};

/// Maximum length for first/last names
pub const MAX_NAME_LEN: usize = 192;

/// Maximum length for an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LEN: usize = 254;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Stored user, including the password hash
#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of the user (no password hash).
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email_address: self.email_address.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// User fields safe to expose (course creators, `GET /api/users`)
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

/// Validated, normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create an email address, validating format.
    ///
    /// # Example
    /// ```
    /// use coursedir_server::models::EmailAddress;
    ///
    /// let email = EmailAddress::new(" Joe@Smith.com ").unwrap();
    /// assert_eq!(email.as_str(), "joe@smith.com");
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let field = "emailAddress";
        let normalized = s.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if normalized.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(&normalized) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be a valid email address",
            });
        }

        Ok(Self(normalized))
    }

    /// Normalize without validating, for credential lookups.
    ///
    /// A malformed address simply won't match any stored user.
    pub fn for_lookup(s: &str) -> Self {
        Self(s.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that passed the length policy
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn new(s: String) -> Result<Self, ValidationError> {
        let field = "password";

        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if s.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort {
                field,
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self(s))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Registration input after validation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: EmailAddress,
    pub password: Password,
}

impl NewUser {
    /// Validate every field, collecting all failures.
    pub fn parse(
        first_name: Option<String>,
        last_name: Option<String>,
        email_address: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let first_name = errors.check(required_text("firstName", first_name, Some(MAX_NAME_LEN)));
        let last_name = errors.check(required_text("lastName", last_name, Some(MAX_NAME_LEN)));
        let email_address = errors.check(
            email_address
                .ok_or(ValidationError::Missing { field: "emailAddress" })
                .and_then(|e| EmailAddress::new(&e)),
        );
        let password = errors.check(
            password
                .ok_or(ValidationError::Missing { field: "password" })
                .and_then(Password::new),
        );

        match (first_name, last_name, email_address, password) {
            (Some(first_name), Some(last_name), Some(email_address), Some(password))
                if errors.is_empty() =>
            {
                Ok(Self {
                    first_name,
                    last_name,
                    email_address,
                    password,
                })
            }
            _ => Err(errors),
        }
    }
}
