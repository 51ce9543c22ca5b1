//! Expiry prediction HTTP handler.
//!
//! ```text
//! GET /prediction/predict?name=Milk&category=dairy&buy_date=2024-05-20
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, PredictionError, format_calendar_date};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::non_empty;

const MISSING_PARAMETERS: &str =
    "Missing required parameters. Provide 'name', 'category', and 'buy_date'";

/// Prediction query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PredictQuery {
    /// Product name, e.g. `Milk`.
    pub name: Option<String>,
    /// Category name, matched case-insensitively.
    pub category: Option<String>,
    /// Purchase date, `YYYY-MM-DD`.
    pub buy_date: Option<String>,
}

/// Successful prediction body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResponse {
    #[schema(example = "2024-05-30")]
    pub predicted_expiry_date: String,
}

fn prediction_error_code(err: &PredictionError) -> &'static str {
    match err {
        PredictionError::ModelUnavailable => "model_unavailable",
        PredictionError::UnknownCategory { .. } => "unknown_category",
        PredictionError::InvalidDateFormat { .. } => "invalid_date",
        PredictionError::Inference { .. } | PredictionError::DateOutOfRange => "prediction_failed",
    }
}

fn map_prediction_error(err: PredictionError) -> Error {
    let code = prediction_error_code(&err);
    Error::invalid_request(err.to_string()).with_details(json!({ "code": code }))
}

/// Estimate a product's expiry date from its purchase date.
#[utoipa::path(
    get,
    path = "/prediction/predict",
    params(PredictQuery),
    responses(
        (status = 200, description = "Predicted expiry date", body = PredictionResponse),
        (status = 400, description = "Missing parameters, unknown category, bad date or model unavailable", body = ErrorSchema)
    ),
    tags = ["prediction"],
    operation_id = "predictExpiry"
)]
#[get("/predict")]
pub async fn predict(
    state: web::Data<HttpState>,
    query: web::Query<PredictQuery>,
) -> ApiResult<web::Json<PredictionResponse>> {
    let (Some(name), Some(category), Some(buy_date)) = (
        non_empty(query.name.as_deref()),
        non_empty(query.category.as_deref()),
        non_empty(query.buy_date.as_deref()),
    ) else {
        return Err(Error::invalid_request(MISSING_PARAMETERS)
            .with_details(json!({ "code": "missing_parameters" })));
    };

    let predicted = state
        .predictor
        .predict(name, category, buy_date)
        .map_err(map_prediction_error)?;
    Ok(web::Json(PredictionResponse {
        predicted_expiry_date: format_calendar_date(predicted),
    }))
}
