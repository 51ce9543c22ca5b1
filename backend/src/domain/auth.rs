//! Authentication primitives: login credentials and signup requests.
//!
//! Handlers build these from raw request strings before calling a driving
//! port, so services only ever see validated input. Passwords are trimmed of
//! surrounding whitespace on both paths and held in [`Zeroizing`] buffers.

use zeroize::Zeroizing;

use super::{DisplayName, UserId, UserValidationError};

/// Validation errors for credential payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// The user id was missing or invalid.
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Password was blank once trimmed.
    #[error("password must not be empty")]
    EmptyPassword,
}

fn normalise_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(trimmed.to_owned()))
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use pantry_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" u1 ", " secret ").unwrap();
/// assert_eq!(creds.user_id().as_ref(), "u1");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    user_id: UserId,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw user id and password inputs.
    pub fn try_from_parts(
        user_id: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            password: normalise_password(password)?,
        })
    }

    /// Account identifier to authenticate.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Trimmed password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    user_id: UserId,
    display_name: DisplayName,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Construct a signup request from raw inputs. The display name may be
    /// empty.
    pub fn try_from_parts(
        display_name: &str,
        user_id: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            display_name: DisplayName::new(display_name)?,
            password: normalise_password(password)?,
        })
    }

    /// Requested account identifier.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Requested display name.
    #[must_use]
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Trimmed plaintext password, to be hashed before storage.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
