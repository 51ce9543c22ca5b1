//! Partial profile updates.

use zeroize::Zeroizing;

use super::{DisplayName, PasswordHash, UserValidationError};

/// Validation errors for profile update payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileUpdateValidationError {
    #[error("No valid fields to update")]
    NoFields,
    #[error(transparent)]
    User(#[from] UserValidationError),
}

/// Requested profile changes. At least one field is present.
///
/// Fields that are missing or blank after trimming are ignored.
///
/// # Examples
/// ```
/// use pantry_backend::domain::ProfileUpdate;
///
/// let update = ProfileUpdate::try_from_parts(Some(" Ada "), Some("  ")).unwrap();
/// assert_eq!(update.display_name().map(|n| n.as_ref()), Some("Ada"));
/// assert!(update.password().is_none());
/// assert!(ProfileUpdate::try_from_parts(None, Some("")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    display_name: Option<DisplayName>,
    password: Option<Zeroizing<String>>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl ProfileUpdate {
    /// Build an update from optional raw fields.
    pub fn try_from_parts(
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ProfileUpdateValidationError> {
        let display_name = non_blank(name).map(DisplayName::new).transpose()?;
        let password = non_blank(password).map(|value| Zeroizing::new(value.to_owned()));
        if display_name.is_none() && password.is_none() {
            return Err(ProfileUpdateValidationError::NoFields);
        }
        Ok(Self {
            display_name,
            password,
        })
    }

    /// New display name, if requested.
    #[must_use]
    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// New plaintext password, if requested.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|value| value.as_str())
    }
}

/// Column changes written by the user repository.
///
/// Only the whitelisted columns can change; `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub display_name: Option<DisplayName>,
    pub password_hash: Option<PasswordHash>,
}

impl ProfileChanges {
    /// Whether no column would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.password_hash.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("   "), Some("\t"))]
    fn blank_updates_are_rejected(#[case] name: Option<&str>, #[case] password: Option<&str>) {
        assert_eq!(
            ProfileUpdate::try_from_parts(name, password),
            Err(ProfileUpdateValidationError::NoFields)
        );
    }

    #[rstest]
    fn password_only_update_is_accepted() {
        let update = ProfileUpdate::try_from_parts(None, Some(" new-secret ")).expect("valid");
        assert!(update.display_name().is_none());
        assert_eq!(update.password(), Some("new-secret"));
    }

    #[rstest]
    fn both_fields_are_kept() {
        let update = ProfileUpdate::try_from_parts(Some("Grace"), Some("pw")).expect("valid");
        assert_eq!(update.display_name().map(|name| name.as_ref()), Some("Grace"));
        assert_eq!(update.password(), Some("pw"));
    }

    #[rstest]
    fn empty_changes_report_empty() {
        assert!(ProfileChanges::default().is_empty());
    }
}
