//! Profile HTTP handlers.
//!
//! ```text
//! GET    /others/get-name?user_id=ada
//! PUT    /others/update-profile?user_id=ada {"name":"Ada","password":"new"}
//! DELETE /others/delete-profile?user_id=ada
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, ProfileUpdate, ProfileUpdateValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    DISPLAY_NAME, invalid_field_error, missing_body_error, require_user_id,
};

const MISSING_USER_ID: &str = "Missing user_id";

/// `user_id` query parameter shared by the profile endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Account to act on.
    pub user_id: Option<String>,
}

/// Display name lookup body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NameResponse {
    #[schema(example = "User name retrieved successfully")]
    pub message: String,
    #[schema(example = "Ada")]
    pub name: String,
}

/// Partial profile update. Blank fields are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn map_profile_update_error(err: ProfileUpdateValidationError) -> Error {
    match err {
        ProfileUpdateValidationError::NoFields => Error::invalid_request(err.to_string())
            .with_details(json!({ "code": "no_fields" })),
        ProfileUpdateValidationError::User(inner) => {
            invalid_field_error(DISPLAY_NAME, inner.to_string())
        }
    }
}

/// Fetch a user's display name.
#[utoipa::path(
    get,
    path = "/others/get-name",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Display name", body = NameResponse),
        (status = 400, description = "Missing user_id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["others"],
    operation_id = "getName"
)]
#[get("/get-name")]
pub async fn get_name(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<NameResponse>> {
    let user_id = require_user_id(query.user_id.as_deref(), MISSING_USER_ID)?;
    let name = state.profile_query.display_name(&user_id).await?;
    Ok(web::Json(NameResponse {
        message: "User name retrieved successfully".to_owned(),
        name: name.to_string(),
    }))
}

/// Change the display name and/or password.
#[utoipa::path(
    put,
    path = "/others/update-profile",
    params(UserIdQuery),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing user_id, body or fields", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["others"],
    operation_id = "updateProfile"
)]
#[put("/update-profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
    payload: Option<web::Json<UpdateProfileRequest>>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = require_user_id(query.user_id.as_deref(), MISSING_USER_ID)?;
    let payload = payload
        .ok_or_else(|| missing_body_error("Missing request data"))?
        .into_inner();
    let update = ProfileUpdate::try_from_parts(payload.name.as_deref(), payload.password.as_deref())
        .map_err(map_profile_update_error)?;

    state.profile.update_profile(&user_id, &update).await?;
    Ok(web::Json(MessageResponse::new("Profile updated successfully")))
}

/// Delete the account and every pantry item it owns.
#[utoipa::path(
    delete,
    path = "/others/delete-profile",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Profile and items deleted", body = MessageResponse),
        (status = 400, description = "Missing user_id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["others"],
    operation_id = "deleteProfile"
)]
#[delete("/delete-profile")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<HttpResponse> {
    let user_id = require_user_id(query.user_id.as_deref(), MISSING_USER_ID)?;
    state.profile.delete_profile(&user_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Profile and associated data deleted successfully",
    )))
}
