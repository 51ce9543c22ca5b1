//! Account HTTP handlers.
//!
//! ```text
//! POST /auth/signup {"user_name":"Ada","user_id":"ada","password":"secret"}
//! POST /auth/login  {"user_id":"ada","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, NewAccount};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_credentials_error, missing_body_error};

const NO_DATA: &str = "No data provided";

/// Signup request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Display name; optional.
    #[serde(default, alias = "user_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user_id: String,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 409, description = "User already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: Option<web::Json<SignupRequest>>,
) -> ApiResult<HttpResponse> {
    let payload = payload.ok_or_else(|| missing_body_error(NO_DATA))?.into_inner();
    let account = NewAccount::try_from_parts(
        payload.display_name.as_deref().unwrap_or_default(),
        payload.user_id.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .map_err(map_credentials_error)?;

    state.signup.register(&account).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User created successfully")))
}

/// Check a user id and password.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing fields", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: Option<web::Json<LoginRequest>>,
) -> ApiResult<web::Json<LoginResponse>> {
    let payload = payload.ok_or_else(|| missing_body_error(NO_DATA))?.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        payload.user_id.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .map_err(map_credentials_error)?;

    let user_id = state.login.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "Login successful".to_owned(),
        user_id: user_id.to_string(),
    }))
}
