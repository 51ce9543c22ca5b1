//! Pantry inventory HTTP handlers.
//!
//! ```text
//! POST   /pantry/add-item?user_id=u1     {"item":{"id":"i1","name":"Milk",...}}
//! PUT    /pantry/update-item?user_id=u1  {"item":{...}}
//! DELETE /pantry/delete-item?user_id=u1&id=i1
//! GET    /pantry/get-items?user_id=u1
//! ```
//!
//! Item bodies use camelCase keys (`expiryDate`, `addedDate`); dates are
//! `YYYY-MM-DD` and blank dates are stored as absent.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, PantryItem, PantryItemDraft, PantryItemId, PantryItemValidationError,
    format_calendar_date,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_item_error, missing_body_error, missing_field_error, require_user_id,
};

const MISSING_ITEM_DATA: &str = "Missing user_id or item data";
const MISSING_ITEM_ID: &str = "Missing user_id or item id";

const ITEM: FieldName = FieldName::new("item");
const ITEM_ID: FieldName = FieldName::new("id");
const QUANTITY: FieldName = FieldName::new("quantity");
const UNIT: FieldName = FieldName::new("unit");
const CATEGORY: FieldName = FieldName::new("category");

/// `user_id` query parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    /// Owner of the items.
    pub user_id: Option<String>,
}

/// `user_id` and `id` query parameters for deletion.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteItemQuery {
    /// Owner of the item.
    pub user_id: Option<String>,
    /// Item to delete.
    pub id: Option<String>,
}

/// Item fields as sent by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemPayload {
    #[schema(example = "i1")]
    pub id: Option<String>,
    #[schema(example = "Milk")]
    pub name: Option<String>,
    #[schema(example = 1.5)]
    pub quantity: Option<f64>,
    #[schema(example = "L")]
    pub unit: Option<String>,
    #[schema(example = "dairy")]
    pub category: Option<String>,
    #[schema(example = "2024-05-30")]
    pub expiry_date: Option<String>,
    #[schema(example = "2024-05-20")]
    pub added_date: Option<String>,
    pub notes: Option<String>,
}

/// Envelope wrapping an item in add and update requests.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PantryItemRequest {
    #[serde(default)]
    pub item: Option<PantryItemPayload>,
}

/// Item as returned by `get-items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PantryItemResponse {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<String>,
    pub added_date: Option<String>,
    pub notes: Option<String>,
}

impl From<&PantryItem> for PantryItemResponse {
    fn from(item: &PantryItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_owned(),
            quantity: item.quantity(),
            unit: item.unit().to_owned(),
            category: item.category().to_owned(),
            expiry_date: item.expiry_date().map(format_calendar_date),
            added_date: item.added_date().map(format_calendar_date),
            notes: item.notes().map(str::to_owned),
        }
    }
}

/// `get-items` body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PantryItemsResponse {
    #[schema(example = "Items retrieved successfully")]
    pub message: String,
    pub data: Vec<PantryItemResponse>,
}

fn required<T>(value: Option<T>, field: FieldName, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field, &format!("Missing item field: {name}")))
}

fn parse_item(payload: Option<web::Json<PantryItemRequest>>) -> Result<PantryItem, Error> {
    let item = payload
        .ok_or_else(|| missing_body_error(MISSING_ITEM_DATA))?
        .into_inner()
        .item
        .ok_or_else(|| missing_field_error(ITEM, MISSING_ITEM_DATA))?;

    let draft = PantryItemDraft {
        id: item.id.unwrap_or_default(),
        name: item.name.unwrap_or_default(),
        quantity: required(item.quantity, QUANTITY, "quantity")?,
        unit: required(item.unit, UNIT, "unit")?,
        category: required(item.category, CATEGORY, "category")?,
        expiry_date: item.expiry_date,
        added_date: item.added_date,
        notes: item.notes,
    };
    PantryItem::try_from_draft(draft).map_err(map_item_error)
}

fn parse_item_id(raw: Option<&str>) -> Result<PantryItemId, Error> {
    PantryItemId::new(raw.unwrap_or_default()).map_err(|err| match err {
        PantryItemValidationError::EmptyId => missing_field_error(ITEM_ID, MISSING_ITEM_ID),
        other => map_item_error(other),
    })
}

/// Add an item to a user's pantry.
#[utoipa::path(
    post,
    path = "/pantry/add-item",
    params(OwnerQuery),
    request_body = PantryItemRequest,
    responses(
        (status = 201, description = "Item added", body = MessageResponse),
        (status = 400, description = "Missing or invalid item data", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Item id already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pantry"],
    operation_id = "addItem"
)]
#[post("/add-item")]
pub async fn add_item(
    state: web::Data<HttpState>,
    query: web::Query<OwnerQuery>,
    payload: Option<web::Json<PantryItemRequest>>,
) -> ApiResult<HttpResponse> {
    let owner = require_user_id(query.user_id.as_deref(), MISSING_ITEM_DATA)?;
    let item = parse_item(payload)?;

    state.pantry.add_item(&owner, &item).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Item added successfully")))
}

/// Overwrite an existing item owned by the user.
#[utoipa::path(
    put,
    path = "/pantry/update-item",
    params(OwnerQuery),
    request_body = PantryItemRequest,
    responses(
        (status = 200, description = "Item updated", body = MessageResponse),
        (status = 400, description = "Missing or invalid item data", body = ErrorSchema),
        (status = 404, description = "Item not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pantry"],
    operation_id = "updateItem"
)]
#[put("/update-item")]
pub async fn update_item(
    state: web::Data<HttpState>,
    query: web::Query<OwnerQuery>,
    payload: Option<web::Json<PantryItemRequest>>,
) -> ApiResult<web::Json<MessageResponse>> {
    let owner = require_user_id(query.user_id.as_deref(), MISSING_ITEM_DATA)?;
    let item = parse_item(payload)?;

    state.pantry.update_item(&owner, &item).await?;
    Ok(web::Json(MessageResponse::new("Item updated successfully")))
}

/// Delete an item. Deleting an absent item still succeeds.
#[utoipa::path(
    delete,
    path = "/pantry/delete-item",
    params(DeleteItemQuery),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "Missing user_id or id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pantry"],
    operation_id = "deleteItem"
)]
#[delete("/delete-item")]
pub async fn delete_item(
    state: web::Data<HttpState>,
    query: web::Query<DeleteItemQuery>,
) -> ApiResult<web::Json<MessageResponse>> {
    let owner = require_user_id(query.user_id.as_deref(), MISSING_ITEM_ID)?;
    let item_id = parse_item_id(query.id.as_deref())?;

    state.pantry.delete_item(&owner, &item_id).await?;
    Ok(web::Json(MessageResponse::new("Item deleted successfully")))
}

/// List a user's items ordered by added date.
#[utoipa::path(
    get,
    path = "/pantry/get-items",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Items", body = PantryItemsResponse),
        (status = 400, description = "Missing user_id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pantry"],
    operation_id = "getItems"
)]
#[get("/get-items")]
pub async fn get_items(
    state: web::Data<HttpState>,
    query: web::Query<OwnerQuery>,
) -> ApiResult<web::Json<PantryItemsResponse>> {
    let owner = require_user_id(query.user_id.as_deref(), "Missing user_id")?;
    let items = state.pantry_query.list_items(&owner).await?;

    Ok(web::Json(PantryItemsResponse {
        message: "Items retrieved successfully".to_owned(),
        data: items.iter().map(PantryItemResponse::from).collect(),
    }))
}
