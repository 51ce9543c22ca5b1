//! Lookup-table shelf-life model loaded from a JSON artifact.
//!
//! The artifact names a default duration plus three override tables:
//!
//! ```json
//! {
//!   "default_days": 7.0,
//!   "categories": { "7": 10.0 },
//!   "high_level": { "dairy": 10.0 },
//!   "products": [{ "keyword": "milk", "category_code": 7, "days": 10.0 }]
//! }
//! ```
//!
//! Inference tries product keywords first, then the category code, then the
//! high-level category name, then the default.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use tracing::debug;

use crate::domain::CategoryCode;
use crate::domain::ports::{InferenceError, ShelfLifeFeatures, ShelfLifeModel};

/// Errors raised while loading the artifact.
#[derive(Debug, thiserror::Error)]
pub enum LookupModelError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The artifact is not valid JSON for this schema.
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    /// A duration is negative or not finite.
    #[error("invalid duration {value} for {entry}")]
    InvalidDays { entry: String, value: f64 },
    /// A `categories` key is not an integer category code.
    #[error("invalid category code key {key:?}")]
    InvalidCategoryKey { key: String },
    /// A product rule has a blank keyword.
    #[error("product rule {index} has an empty keyword")]
    EmptyKeyword { index: usize },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Artifact {
    default_days: f64,
    #[serde(default)]
    categories: HashMap<String, f64>,
    #[serde(default)]
    high_level: HashMap<String, f64>,
    #[serde(default)]
    products: Vec<ProductRuleDto>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductRuleDto {
    keyword: String,
    #[serde(default)]
    category_code: Option<u16>,
    days: f64,
}

#[derive(Debug, Clone, PartialEq)]
struct ProductRule {
    keyword: String,
    category_code: Option<CategoryCode>,
    days: f64,
}

impl ProductRule {
    fn matches(&self, lowered_name: &str, code: CategoryCode) -> bool {
        lowered_name.contains(self.keyword.as_str())
            && self.category_code.is_none_or(|expected| expected == code)
    }
}

/// In-memory lookup model.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupShelfLifeModel {
    default_days: f64,
    categories: HashMap<CategoryCode, f64>,
    high_level: HashMap<String, f64>,
    products: Vec<ProductRule>,
}

fn checked_days(entry: impl Into<String>, value: f64) -> Result<f64, LookupModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LookupModelError::InvalidDays {
            entry: entry.into(),
            value,
        })
    }
}

fn read_artifact(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "model path must name a file")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(Path::new(file_name))
}

impl LookupShelfLifeModel {
    /// Load and validate the artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupModelError`] when the file is unreadable, malformed or
    /// contains an invalid entry.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, LookupModelError> {
        let path = path.as_ref();
        let raw = read_artifact(path).map_err(|source| LookupModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            products = model.products.len(),
            categories = model.categories.len(),
            "shelf-life model artifact parsed"
        );
        Ok(model)
    }

    /// Parse and validate an artifact held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`LookupModelError`] for malformed JSON or invalid entries.
    ///
    /// # Examples
    /// ```
    /// use pantry_backend::outbound::model::LookupShelfLifeModel;
    ///
    /// let model = LookupShelfLifeModel::from_json_str(r#"{"default_days": 5.0}"#).unwrap();
    /// assert_eq!(model.default_days(), 5.0);
    /// ```
    pub fn from_json_str(raw: &str) -> Result<Self, LookupModelError> {
        let artifact: Artifact = serde_json::from_str(raw)?;

        let default_days = checked_days("default_days", artifact.default_days)?;

        let categories = artifact
            .categories
            .into_iter()
            .map(|(key, days)| {
                let code = key
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| LookupModelError::InvalidCategoryKey { key: key.clone() })?;
                Ok((CategoryCode::new(code), checked_days(format!("categories.{key}"), days)?))
            })
            .collect::<Result<HashMap<_, _>, LookupModelError>>()?;

        let high_level = artifact
            .high_level
            .into_iter()
            .map(|(name, days)| {
                let days = checked_days(format!("high_level.{name}"), days)?;
                Ok((name.to_lowercase(), days))
            })
            .collect::<Result<HashMap<_, _>, LookupModelError>>()?;

        let products = artifact
            .products
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                let keyword = rule.keyword.trim().to_lowercase();
                if keyword.is_empty() {
                    return Err(LookupModelError::EmptyKeyword { index });
                }
                Ok(ProductRule {
                    days: checked_days(format!("products[{index}]"), rule.days)?,
                    keyword,
                    category_code: rule.category_code.map(CategoryCode::new),
                })
            })
            .collect::<Result<Vec<_>, LookupModelError>>()?;

        Ok(Self {
            default_days,
            categories,
            high_level,
            products,
        })
    }

    /// Duration used when no rule matches.
    #[must_use]
    pub fn default_days(&self) -> f64 {
        self.default_days
    }
}

impl ShelfLifeModel for LookupShelfLifeModel {
    fn infer(&self, features: &ShelfLifeFeatures) -> Result<f64, InferenceError> {
        let lowered_name = features.name().to_lowercase();
        let code = features.category_code();

        let days = self
            .products
            .iter()
            .find(|rule| rule.matches(&lowered_name, code))
            .map(|rule| rule.days)
            .or_else(|| self.categories.get(&code).copied())
            .or_else(|| self.high_level.get(features.category_name()).copied())
            .unwrap_or(self.default_days);
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use rstest::{fixture, rstest};

    const ARTIFACT: &str = r#"{
        "default_days": 7.0,
        "categories": { "7": 10.0, "10": 3.0 },
        "high_level": { "Fruits": 5.0 },
        "products": [
            { "keyword": "UHT", "category_code": 7, "days": 90.0 },
            { "keyword": "rice", "days": 365.0 }
        ]
    }"#;

    #[fixture]
    fn model() -> LookupShelfLifeModel {
        LookupShelfLifeModel::from_json_str(ARTIFACT).expect("valid artifact")
    }

    fn features(name: &str, code: u16, category: &str) -> ShelfLifeFeatures {
        ShelfLifeFeatures::new(name, CategoryCode::new(code), category)
    }

    #[rstest]
    #[case::product_keyword("uht milk", 7, "dairy", 90.0)]
    #[case::keyword_needs_matching_code("UHT cream", 10, "meat", 3.0)]
    #[case::keyword_without_code("Basmati Rice", 1, "general", 365.0)]
    #[case::category_code("Milk", 7, "dairy", 10.0)]
    #[case::high_level_name("Apple", 18, "fruits", 5.0)]
    #[case::default("Salt", 3, "spices", 7.0)]
    fn inference_falls_through_the_tables(
        model: LookupShelfLifeModel,
        #[case] name: &str,
        #[case] code: u16,
        #[case] category: &str,
        #[case] expected: f64,
    ) {
        assert_eq!(model.infer(&features(name, code, category)), Ok(expected));
    }

    #[rstest]
    #[case::negative(r#"{"default_days": -1.0}"#)]
    #[case::negative_category(r#"{"default_days": 1.0, "categories": {"7": -2.0}}"#)]
    #[case::bad_key(r#"{"default_days": 1.0, "categories": {"dairy": 2.0}}"#)]
    #[case::blank_keyword(r#"{"default_days": 1.0, "products": [{"keyword": " ", "days": 1.0}]}"#)]
    #[case::missing_default(r#"{"categories": {}}"#)]
    #[case::unknown_field(r#"{"default_days": 1.0, "weights": []}"#)]
    #[case::not_json("joblib pickle")]
    fn invalid_artifacts_are_rejected(#[case] raw: &str) {
        assert!(LookupShelfLifeModel::from_json_str(raw).is_err());
    }

    #[rstest]
    fn loads_from_a_file(model: LookupShelfLifeModel) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(ARTIFACT.as_bytes()).expect("write artifact");

        let loaded = LookupShelfLifeModel::load_from_path(file.path()).expect("load");
        assert_eq!(loaded, model);
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = LookupShelfLifeModel::load_from_path(dir.path().join("absent.json"))
            .expect_err("missing file");
        assert!(matches!(err, LookupModelError::Read { .. }));
    }
}
