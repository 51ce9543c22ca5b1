//! PostgreSQL-backed `PantryRepository` implementation using Diesel ORM.
//!
//! Every statement filters on both the item id and the owning user so one
//! user can never read or mutate another user's items.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PantryPersistenceError, PantryRepository};
use crate::domain::{PantryItem, PantryItemId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewPantryItemRow, PantryItemChangeset, PantryItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::pantry_items;

/// Diesel-backed implementation of the `PantryRepository` port.
#[derive(Clone)]
pub struct DieselPantryRepository {
    pool: DbPool,
}

impl DieselPantryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PantryPersistenceError {
    PantryPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: DieselError) -> PantryPersistenceError {
    let failure = classify_diesel_error(&error);
    match failure {
        DieselFailure::Connection => PantryPersistenceError::connection(failure.describe()),
        _ => PantryPersistenceError::query(failure.describe()),
    }
}

fn row_to_item(row: PantryItemRow) -> Result<PantryItem, PantryPersistenceError> {
    let id = PantryItemId::new(&row.id).map_err(|err| {
        PantryPersistenceError::query(format!("stored item {} is invalid: {err}", row.id))
    })?;
    Ok(PantryItem::from_parts(
        id,
        row.item_name,
        row.quantity,
        row.unit,
        row.category,
        row.expiry_date,
        row.added_date,
        row.notes,
    ))
}

#[async_trait]
impl PantryRepository for DieselPantryRepository {
    async fn insert(
        &self,
        owner: &UserId,
        item: &PantryItem,
    ) -> Result<(), PantryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPantryItemRow {
            id: item.id().as_ref(),
            user_id: owner.as_ref(),
            item_name: item.name(),
            quantity: item.quantity(),
            unit: item.unit(),
            category: item.category(),
            expiry_date: item.expiry_date(),
            added_date: item.added_date(),
            notes: item.notes(),
        };

        diesel::insert_into(pantry_items::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| match classify_diesel_error(&err) {
                DieselFailure::UniqueViolation => {
                    PantryPersistenceError::duplicate(item.id().as_ref())
                }
                DieselFailure::ForeignKeyViolation => {
                    PantryPersistenceError::missing_owner(owner.as_ref())
                }
                _ => map_diesel_error(err),
            })
    }

    async fn update(
        &self,
        owner: &UserId,
        item: &PantryItem,
    ) -> Result<bool, PantryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = PantryItemChangeset {
            item_name: item.name(),
            quantity: item.quantity(),
            unit: item.unit(),
            category: item.category(),
            expiry_date: item.expiry_date(),
            added_date: item.added_date(),
            notes: item.notes(),
        };

        let updated = diesel::update(
            pantry_items::table
                .filter(pantry_items::id.eq(item.id().as_ref()))
                .filter(pantry_items::user_id.eq(owner.as_ref())),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(
        &self,
        owner: &UserId,
        item_id: &PantryItemId,
    ) -> Result<bool, PantryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            pantry_items::table
                .filter(pantry_items::id.eq(item_id.as_ref()))
                .filter(pantry_items::user_id.eq(owner.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<PantryItem>, PantryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PantryItemRow> = pantry_items::table
            .filter(pantry_items::user_id.eq(owner.as_ref()))
            .order((pantry_items::added_date.asc(), pantry_items::id.asc()))
            .select(PantryItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn row(id: &str) -> PantryItemRow {
        PantryItemRow {
            id: id.to_owned(),
            item_name: "Milk".to_owned(),
            quantity: 1.5,
            unit: "L".to_owned(),
            category: "dairy".to_owned(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 5, 30),
            added_date: None,
            notes: Some("top shelf".to_owned()),
        }
    }

    #[rstest]
    fn row_maps_every_column() {
        let item = row_to_item(row("i1")).expect("valid row");

        assert_eq!(item.id().as_ref(), "i1");
        assert_eq!(item.name(), "Milk");
        assert_eq!(item.quantity(), 1.5);
        assert_eq!(item.unit(), "L");
        assert_eq!(item.category(), "dairy");
        assert_eq!(item.expiry_date(), NaiveDate::from_ymd_opt(2024, 5, 30));
        assert_eq!(item.added_date(), None);
        assert_eq!(item.notes(), Some("top shelf"));
    }

    #[rstest]
    fn blank_stored_id_is_a_query_error() {
        let err = row_to_item(row("")).expect_err("blank id");
        assert!(matches!(err, PantryPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::build("bad url"));
        assert_eq!(err, PantryPersistenceError::connection("bad url"));
    }
}
