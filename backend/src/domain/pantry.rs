//! Pantry inventory items.
//!
//! An item belongs to exactly one user; ownership is not part of the item
//! itself but is passed alongside it to the pantry ports so every mutation is
//! scoped to `(item id, user id)`.

use std::fmt;

use chrono::NaiveDate;

use super::calendar::{CalendarDateError, parse_calendar_date};

/// Maximum length, in characters, of an item id.
pub const ITEM_ID_MAX: usize = 255;
/// Maximum length, in characters, of an item name.
pub const ITEM_NAME_MAX: usize = 255;
/// Maximum length, in characters, of a unit or category.
pub const ITEM_LABEL_MAX: usize = 50;

/// Validation errors for pantry item payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PantryItemValidationError {
    #[error("item id must not be empty")]
    EmptyId,
    #[error("item id must be at most {max} characters")]
    IdTooLong { max: usize },
    #[error("item name must not be empty")]
    EmptyName,
    #[error("item name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("unit must be at most {max} characters")]
    UnitTooLong { max: usize },
    #[error("category must be at most {max} characters")]
    CategoryTooLong { max: usize },
    #[error("quantity must be a finite number")]
    NonFiniteQuantity,
    #[error("{field} must be in YYYY-MM-DD format")]
    InvalidDate {
        field: &'static str,
        #[source]
        source: CalendarDateError,
    },
}

/// Client-chosen identifier of a pantry item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PantryItemId(String);

impl PantryItemId {
    /// Trim and validate an item id.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PantryItemValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PantryItemValidationError::EmptyId);
        }
        if trimmed.chars().count() > ITEM_ID_MAX {
            return Err(PantryItemValidationError::IdTooLong { max: ITEM_ID_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PantryItemId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PantryItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Unvalidated item fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PantryItemDraft {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<String>,
    pub added_date: Option<String>,
    pub notes: Option<String>,
}

/// A validated pantry item.
///
/// ## Invariants
/// - `id` and `name` are trimmed and non-empty.
/// - `quantity` is finite.
/// - `name`, `unit` and `category` fit their column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct PantryItem {
    id: PantryItemId,
    name: String,
    quantity: f64,
    unit: String,
    category: String,
    expiry_date: Option<NaiveDate>,
    added_date: Option<NaiveDate>,
    notes: Option<String>,
}

fn optional_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, PantryItemValidationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => parse_calendar_date(value)
            .map(Some)
            .map_err(|source| PantryItemValidationError::InvalidDate { field, source }),
    }
}

impl PantryItem {
    /// Validate a draft into an item.
    ///
    /// Blank dates are treated as absent. Blank notes are kept as given.
    ///
    /// # Examples
    /// ```
    /// use pantry_backend::domain::{PantryItem, PantryItemDraft};
    ///
    /// let item = PantryItem::try_from_draft(PantryItemDraft {
    ///     id: "i1".into(),
    ///     name: "Milk".into(),
    ///     quantity: 1.0,
    ///     unit: "L".into(),
    ///     category: "dairy".into(),
    ///     expiry_date: Some("2024-05-30".into()),
    ///     ..PantryItemDraft::default()
    /// })
    /// .unwrap();
    /// assert_eq!(item.name(), "Milk");
    /// assert!(item.added_date().is_none());
    /// ```
    pub fn try_from_draft(draft: PantryItemDraft) -> Result<Self, PantryItemValidationError> {
        let id = PantryItemId::new(&draft.id)?;
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(PantryItemValidationError::EmptyName);
        }
        if name.chars().count() > ITEM_NAME_MAX {
            return Err(PantryItemValidationError::NameTooLong { max: ITEM_NAME_MAX });
        }
        if draft.unit.chars().count() > ITEM_LABEL_MAX {
            return Err(PantryItemValidationError::UnitTooLong {
                max: ITEM_LABEL_MAX,
            });
        }
        if draft.category.chars().count() > ITEM_LABEL_MAX {
            return Err(PantryItemValidationError::CategoryTooLong {
                max: ITEM_LABEL_MAX,
            });
        }
        if !draft.quantity.is_finite() {
            return Err(PantryItemValidationError::NonFiniteQuantity);
        }
        let expiry_date = optional_date("expiryDate", draft.expiry_date.as_deref())?;
        let added_date = optional_date("addedDate", draft.added_date.as_deref())?;

        Ok(Self {
            id,
            name: name.to_owned(),
            quantity: draft.quantity,
            unit: draft.unit,
            category: draft.category,
            expiry_date,
            added_date,
            notes: draft.notes,
        })
    }

    /// Rebuild an item from stored, already validated columns.
    #[expect(
        clippy::too_many_arguments,
        reason = "mirrors the persisted column set one-to-one"
    )]
    #[must_use]
    pub fn from_parts(
        id: PantryItemId,
        name: String,
        quantity: f64,
        unit: String,
        category: String,
        expiry_date: Option<NaiveDate>,
        added_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            quantity,
            unit,
            category,
            expiry_date,
            added_date,
            notes,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PantryItemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        self.unit.as_str()
    }

    /// Free-text category as entered by the user.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    #[must_use]
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    #[must_use]
    pub fn added_date(&self) -> Option<NaiveDate> {
        self.added_date
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn milk() -> PantryItemDraft {
        PantryItemDraft {
            id: "i1".to_owned(),
            name: "Milk".to_owned(),
            quantity: 1.0,
            unit: "L".to_owned(),
            category: "dairy".to_owned(),
            expiry_date: Some("2024-05-30".to_owned()),
            added_date: Some("2024-05-20".to_owned()),
            notes: None,
        }
    }

    #[rstest]
    fn valid_draft_becomes_item(milk: PantryItemDraft) {
        let item = PantryItem::try_from_draft(milk).expect("valid item");
        assert_eq!(item.id().as_ref(), "i1");
        assert_eq!(item.category(), "dairy");
        assert_eq!(item.expiry_date(), NaiveDate::from_ymd_opt(2024, 5, 30));
        assert_eq!(item.added_date(), NaiveDate::from_ymd_opt(2024, 5, 20));
    }

    #[rstest]
    fn blank_id_is_rejected(mut milk: PantryItemDraft) {
        milk.id = "  ".to_owned();
        assert_eq!(
            PantryItem::try_from_draft(milk),
            Err(PantryItemValidationError::EmptyId)
        );
    }

    #[rstest]
    fn blank_name_is_rejected(mut milk: PantryItemDraft) {
        milk.name = String::new();
        assert_eq!(
            PantryItem::try_from_draft(milk),
            Err(PantryItemValidationError::EmptyName)
        );
    }

    #[rstest]
    #[case::name(
        |d: &mut PantryItemDraft| d.name = "n".repeat(ITEM_NAME_MAX + 1),
        PantryItemValidationError::NameTooLong { max: ITEM_NAME_MAX }
    )]
    #[case::unit(
        |d: &mut PantryItemDraft| d.unit = "u".repeat(ITEM_LABEL_MAX + 1),
        PantryItemValidationError::UnitTooLong { max: ITEM_LABEL_MAX }
    )]
    #[case::category(
        |d: &mut PantryItemDraft| d.category = "c".repeat(ITEM_LABEL_MAX + 1),
        PantryItemValidationError::CategoryTooLong { max: ITEM_LABEL_MAX }
    )]
    fn overlong_fields_are_rejected(
        mut milk: PantryItemDraft,
        #[case] edit: fn(&mut PantryItemDraft),
        #[case] expected: PantryItemValidationError,
    ) {
        edit(&mut milk);
        assert_eq!(PantryItem::try_from_draft(milk), Err(expected));
    }

    #[rstest]
    fn fields_at_their_limits_are_accepted(mut milk: PantryItemDraft) {
        milk.name = "é".repeat(ITEM_NAME_MAX);
        milk.unit = "u".repeat(ITEM_LABEL_MAX);
        milk.category = "c".repeat(ITEM_LABEL_MAX);
        assert!(PantryItem::try_from_draft(milk).is_ok());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn non_finite_quantity_is_rejected(mut milk: PantryItemDraft, #[case] quantity: f64) {
        milk.quantity = quantity;
        assert_eq!(
            PantryItem::try_from_draft(milk),
            Err(PantryItemValidationError::NonFiniteQuantity)
        );
    }

    #[rstest]
    fn malformed_expiry_date_names_field(mut milk: PantryItemDraft) {
        milk.expiry_date = Some("30/05/2024".to_owned());
        let err = PantryItem::try_from_draft(milk).expect_err("bad date");
        assert_eq!(err.to_string(), "expiryDate must be in YYYY-MM-DD format");
    }

    #[rstest]
    fn blank_dates_are_absent(mut milk: PantryItemDraft) {
        milk.expiry_date = Some(String::new());
        milk.added_date = None;
        let item = PantryItem::try_from_draft(milk).expect("valid item");
        assert!(item.expiry_date().is_none());
        assert!(item.added_date().is_none());
    }
}
