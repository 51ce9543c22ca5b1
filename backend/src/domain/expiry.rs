//! Expiry prediction.
//!
//! [`ExpiryPredictor`] turns `(product name, category name, purchase date)`
//! into an estimated expiry date:
//!
//! 1. refuse when no model was loaded;
//! 2. normalise the category name to a code;
//! 3. ask the model for a shelf life in days;
//! 4. parse the purchase date;
//! 5. round the shelf life to whole days (ties to even) and add it.
//!
//! The model state is fixed at construction. A predictor built from a failed
//! load stays disabled for the lifetime of the process.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use super::calendar::parse_calendar_date;
use super::category::CategoryMapping;
use super::ports::{ShelfLifeFeatures, ShelfLifeModel};

/// Reasons a prediction cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    /// No model is loaded.
    #[error("ML model not available")]
    ModelUnavailable,
    /// The category name is not in the mapping table.
    #[error("Unknown category: {category}")]
    UnknownCategory { category: String },
    /// The purchase date is not `YYYY-MM-DD`.
    #[error("buy_date must be in YYYY-MM-DD format")]
    InvalidDateFormat { input: String },
    /// The model failed or returned a non-finite duration.
    #[error("Prediction error: {reason}")]
    Inference { reason: String },
    /// The predicted date is outside the supported calendar.
    #[error("Prediction error: predicted date is out of range")]
    DateOutOfRange,
}

/// Whether a model is available for inference.
#[derive(Clone)]
pub enum ModelState {
    /// Model loaded at startup.
    Loaded(Arc<dyn ShelfLifeModel>),
    /// Loading failed; predictions are refused.
    Disabled { reason: String },
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("Loaded"),
            Self::Disabled { reason } => f.debug_struct("Disabled").field("reason", reason).finish(),
        }
    }
}

/// Estimates expiry dates from a category table and a shelf-life model.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use chrono::NaiveDate;
/// use pantry_backend::domain::ExpiryPredictor;
/// use pantry_backend::domain::ports::FixtureShelfLifeModel;
///
/// let predictor = ExpiryPredictor::loaded(Arc::new(FixtureShelfLifeModel::new(10.0)));
/// let date = predictor.predict("Milk", "dairy", "2024-05-20").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 30).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ExpiryPredictor {
    mapping: CategoryMapping,
    model: ModelState,
}

impl ExpiryPredictor {
    /// Predictor over a loaded model and the canonical category table.
    #[must_use]
    pub fn loaded(model: Arc<dyn ShelfLifeModel>) -> Self {
        Self {
            mapping: CategoryMapping::canonical(),
            model: ModelState::Loaded(model),
        }
    }

    /// Predictor that refuses every request.
    #[must_use]
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self {
            mapping: CategoryMapping::canonical(),
            model: ModelState::Disabled {
                reason: reason.into(),
            },
        }
    }

    /// Settle the model state from a startup load attempt.
    pub fn from_load<M, E>(result: Result<M, E>) -> Self
    where
        M: ShelfLifeModel + 'static,
        E: std::fmt::Display,
    {
        match result {
            Ok(model) => {
                info!("shelf-life model loaded");
                Self::loaded(Arc::new(model))
            }
            Err(error) => {
                warn!(%error, "shelf-life model unavailable; predictions disabled");
                Self::disabled(error.to_string())
            }
        }
    }

    /// Replace the category table.
    #[must_use]
    pub fn with_mapping(mut self, mapping: CategoryMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Current model state.
    #[must_use]
    pub fn model_state(&self) -> &ModelState {
        &self.model
    }

    /// Whether predictions can be served.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.model, ModelState::Loaded(_))
    }

    /// Estimate the expiry date of a product bought on `purchase_date`.
    pub fn predict(
        &self,
        product_name: &str,
        category_name: &str,
        purchase_date: &str,
    ) -> Result<NaiveDate, PredictionError> {
        let ModelState::Loaded(model) = &self.model else {
            return Err(PredictionError::ModelUnavailable);
        };

        let code = self.mapping.normalize(category_name).ok_or_else(|| {
            PredictionError::UnknownCategory {
                category: category_name.to_owned(),
            }
        })?;

        let features = ShelfLifeFeatures::new(product_name, code, category_name);
        let days = model
            .infer(&features)
            .map_err(|err| PredictionError::Inference {
                reason: err.to_string(),
            })?;
        if !days.is_finite() {
            return Err(PredictionError::Inference {
                reason: format!("model returned a non-finite duration ({days})"),
            });
        }

        let bought =
            parse_calendar_date(purchase_date).map_err(|_| PredictionError::InvalidDateFormat {
                input: purchase_date.to_owned(),
            })?;

        add_days(bought, days)
    }
}

fn add_days(date: NaiveDate, days: f64) -> Result<NaiveDate, PredictionError> {
    // Out-of-range floats saturate here and are rejected by `try_days`.
    let whole_days = days.round_ties_even() as i64;
    Duration::try_days(whole_days)
        .and_then(|offset| date.checked_add_signed(offset))
        .ok_or(PredictionError::DateOutOfRange)
}
