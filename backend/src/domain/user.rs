//! User account model.
//!
//! Users are identified by a caller-chosen string id (the login name) rather
//! than a generated UUID. Both the id and the display name are bounded by the
//! width of their database columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a user id.
pub const USER_ID_MAX: usize = 255;
/// Maximum length, in characters, of a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be at most {max} characters")]
    IdTooLong { max: usize },
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable user identifier chosen at signup.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty.
///
/// # Examples
/// ```
/// use pantry_backend::domain::UserId;
///
/// let id = UserId::new("  u1 ").unwrap();
/// assert_eq!(id.as_ref(), "u1");
/// assert!(UserId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if trimmed.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
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

/// Human readable name shown in the client. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Trim and validate a display name.
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Whether the name is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
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

/// Encoded password hash in PHC string format.
///
/// The `Debug` output is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Application user as exposed to callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    display_name: DisplayName,
}

impl User {
    /// Build a [`User`] from validated components.
    #[must_use]
    pub fn new(id: UserId, display_name: DisplayName) -> Self {
        Self { id, display_name }
    }

    /// Fallible constructor from raw strings.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        display_name: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, DisplayName::new(display_name)?))
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}

/// A user together with the stored password hash, as written at signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with their password hash.
    #[must_use]
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// The public user record.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
