//! HTTP inbound adapter exposing REST endpoints.
//!
//! Route groups mirror the public URL layout: `/auth`, `/others` (profile),
//! `/pantry`, `/prediction`, plus `/` and the health probes.

pub mod auth;
pub mod error;
pub mod health;
pub mod pantry;
pub mod prediction;
pub mod profile;
pub mod root;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every route group on an app or scope.
///
/// Expects [`state::HttpState`] and [`health::HealthState`] in app data.
/// Query and JSON extraction failures are reported in the error envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .service(root::root)
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login),
        )
        .service(
            web::scope("/others")
                .service(profile::get_name)
                .service(profile::update_profile)
                .service(profile::delete_profile),
        )
        .service(
            web::scope("/pantry")
                .service(pantry::add_item)
                .service(pantry::update_item)
                .service(pantry::delete_item)
                .service(pantry::get_items),
        )
        .service(web::scope("/prediction").service(prediction::predict))
        .service(health::ready)
        .service(health::live);
}
