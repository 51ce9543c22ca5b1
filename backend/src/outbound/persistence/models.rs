//! Internal Diesel row structs. Never exposed outside the persistence module.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{pantry_items, users};

/// Row struct for reading users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: String,
    pub user_name: String,
}

/// Insertable struct for creating accounts.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_id: &'a str,
    pub user_name: &'a str,
    pub password_hash: &'a str,
}

/// Partial profile update. `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct ProfileChangeset<'a> {
    pub user_name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

/// Row struct for reading pantry items.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pantry_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PantryItemRow {
    pub id: String,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub expiry_date: Option<NaiveDate>,
    pub added_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Insertable struct for new pantry items.
#[derive(Debug, Insertable)]
#[diesel(table_name = pantry_items)]
pub(crate) struct NewPantryItemRow<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub item_name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
    pub category: &'a str,
    pub expiry_date: Option<NaiveDate>,
    pub added_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

/// Full overwrite of an item's mutable columns.
///
/// `treat_none_as_null` so clearing a date or the notes is persisted.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = pantry_items)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PantryItemChangeset<'a> {
    pub item_name: &'a str,
    pub quantity: f64,
    pub unit: &'a str,
    pub category: &'a str,
    pub expiry_date: Option<NaiveDate>,
    pub added_date: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}
