//! Category normalisation.
//!
//! Maps the free-text category a user types ("Dairy", "meat", ...) onto the
//! integer category code the shelf-life model was trained on. Several codes
//! may share a name; the first declared code is the representative one.

use std::fmt;

/// Integer category code understood by the shelf-life model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryCode(u16);

impl CategoryCode {
    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for CategoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const fn codes<const N: usize>(raw: [u16; N]) -> [CategoryCode; N] {
    let mut out = [CategoryCode(0); N];
    let mut index = 0;
    while index < N {
        out[index] = CategoryCode(raw[index]);
        index += 1;
    }
    out
}

const DAIRY: [CategoryCode; 1] = codes([7]);
const MEAT: [CategoryCode; 12] = codes([10, 11, 12, 13, 14, 15, 16, 17, 20, 21, 22, 25]);
const FRUITS: [CategoryCode; 1] = codes([18]);
const VEGETABLES: [CategoryCode; 1] = codes([19]);
const BAKED: [CategoryCode; 1] = codes([2]);
const GRAINS: [CategoryCode; 1] = codes([9]);
const SPICES: [CategoryCode; 1] = codes([3]);
const SEAFOOD: [CategoryCode; 1] = codes([8]);
const SAUCES: [CategoryCode; 1] = codes([6]);
const GENERAL: [CategoryCode; 5] = codes([1, 4, 5, 23, 24]);

/// One named group of category codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    name: &'static str,
    codes: &'static [CategoryCode],
}

impl CategoryEntry {
    /// Lower-case category name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// All codes in declaration order.
    #[must_use]
    pub const fn codes(&self) -> &'static [CategoryCode] {
        self.codes
    }

    /// The representative (first declared) code.
    #[must_use]
    pub fn primary(&self) -> Option<CategoryCode> {
        self.codes.first().copied()
    }
}

const CANONICAL: [CategoryEntry; 10] = [
    CategoryEntry { name: "dairy", codes: &DAIRY },
    CategoryEntry { name: "meat", codes: &MEAT },
    CategoryEntry { name: "fruits", codes: &FRUITS },
    CategoryEntry { name: "vegetables", codes: &VEGETABLES },
    CategoryEntry { name: "baked", codes: &BAKED },
    CategoryEntry { name: "grains", codes: &GRAINS },
    CategoryEntry { name: "spices", codes: &SPICES },
    CategoryEntry { name: "seafood", codes: &SEAFOOD },
    CategoryEntry { name: "sauces", codes: &SAUCES },
    CategoryEntry { name: "general", codes: &GENERAL },
];

/// Read-only table from category name to codes.
///
/// # Examples
/// ```
/// use pantry_backend::domain::{CategoryCode, CategoryMapping};
///
/// let mapping = CategoryMapping::canonical();
/// assert_eq!(mapping.normalize("Meat"), Some(CategoryCode::new(10)));
/// assert_eq!(mapping.normalize("candy"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMapping {
    entries: &'static [CategoryEntry],
}

impl CategoryMapping {
    /// The single process-wide table.
    #[must_use]
    pub const fn canonical() -> Self {
        Self {
            entries: &CANONICAL,
        }
    }

    /// Entries in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [CategoryEntry] {
        self.entries
    }

    /// Resolve a category name to its representative code.
    ///
    /// Matching is case-insensitive. Surrounding whitespace is significant.
    #[must_use]
    pub fn normalize(&self, category_name: &str) -> Option<CategoryCode> {
        let lowered = category_name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name == lowered)
            .and_then(CategoryEntry::primary)
    }
}

impl Default for CategoryMapping {
    fn default() -> Self {
        Self::canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dairy", 7)]
    #[case("DAIRY", 7)]
    #[case("Meat", 10)]
    #[case("fruits", 18)]
    #[case("vegetables", 19)]
    #[case("baked", 2)]
    #[case("grains", 9)]
    #[case("spices", 3)]
    #[case("seafood", 8)]
    #[case("Sauces", 6)]
    #[case("general", 1)]
    fn known_names_resolve_to_first_code(#[case] name: &str, #[case] expected: u16) {
        let mapping = CategoryMapping::canonical();
        assert_eq!(mapping.normalize(name), Some(CategoryCode::new(expected)));
    }

    #[rstest]
    #[case("unknown")]
    #[case("")]
    #[case(" dairy")]
    #[case("dairy ")]
    #[case("fruit")]
    fn unknown_names_are_none(#[case] name: &str) {
        assert_eq!(CategoryMapping::canonical().normalize(name), None);
    }

    #[rstest]
    fn normalisation_is_idempotent_over_case() {
        let mapping = CategoryMapping::canonical();
        for entry in mapping.entries() {
            let upper = entry.name().to_uppercase();
            assert_eq!(mapping.normalize(&upper), mapping.normalize(entry.name()));
            assert_eq!(mapping.normalize(entry.name()), entry.primary());
        }
    }

    #[rstest]
    fn every_code_is_declared_once() {
        let mut seen: Vec<u16> = CategoryMapping::canonical()
            .entries()
            .iter()
            .flat_map(|entry| entry.codes().iter().map(|code| code.get()))
            .collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(total, 25);
    }
}
