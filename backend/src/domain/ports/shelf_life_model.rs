//! Driven port for the pre-trained shelf-life model.
//!
//! The model is loaded once at startup and is read-only afterwards, so
//! inference is a plain synchronous call.

use crate::domain::CategoryCode;

use super::define_port_error;

/// Features fed to the model for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfLifeFeatures {
    name: String,
    category_code: CategoryCode,
    category_name: String,
}

impl ShelfLifeFeatures {
    /// Build features. The category name is lower-cased.
    #[must_use]
    pub fn new(name: impl Into<String>, category_code: CategoryCode, category_name: &str) -> Self {
        Self {
            name: name.into(),
            category_code,
            category_name: category_name.to_lowercase(),
        }
    }

    /// Product name as entered.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Normalised category code.
    #[must_use]
    pub fn category_code(&self) -> CategoryCode {
        self.category_code
    }

    /// Lower-cased high-level category name.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category_name.as_str()
    }
}

define_port_error! {
    /// Errors raised while running the model.
    pub enum InferenceError {
        /// The model could not produce a prediction for these features.
        Failed { message: String } => "model inference failed: {message}",
    }
}

/// A loaded shelf-life model.
#[cfg_attr(test, mockall::automock)]
pub trait ShelfLifeModel: Send + Sync {
    /// Predict the shelf life, in days, of the described product.
    fn infer(&self, features: &ShelfLifeFeatures) -> Result<f64, InferenceError>;
}

/// Model returning the same duration for every product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixtureShelfLifeModel {
    days: f64,
}

impl FixtureShelfLifeModel {
    /// Model that always predicts `days`.
    #[must_use]
    pub const fn new(days: f64) -> Self {
        Self { days }
    }
}

impl Default for FixtureShelfLifeModel {
    fn default() -> Self {
        Self::new(7.0)
    }
}

impl ShelfLifeModel for FixtureShelfLifeModel {
    fn infer(&self, _features: &ShelfLifeFeatures) -> Result<f64, InferenceError> {
        Ok(self.days)
    }
}
