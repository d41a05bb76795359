use sqlx::{postgres::PgRow, FromRow, PgConnection};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::query_builder::{insert_owned, update_owned, ColumnSet};

/// Column holding the owning user's id on every scoped table.
pub const OWNER_COLUMN: &str = "user_id";

/// A row type that belongs to exactly one user
pub trait OwnedEntity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// Human label used in not-found messages
    const LABEL: &'static str;
    const ORDER_BY: &'static str;
}

/// Data access restricted to the rows of one owner.
///
/// Every query carries `user_id = owner`; a row owned by someone else is
/// indistinguishable from a row that does not exist.
pub struct ScopedRepository<T> {
    owner: Uuid,
    _phantom: PhantomData<T>,
}

impl<T: OwnedEntity> ScopedRepository<T> {
    pub fn new(owner: Uuid) -> Self {
        Self {
            owner,
            _phantom: PhantomData,
        }
    }

    pub async fn list(&self, conn: &mut PgConnection) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE \"{}\" = $1 ORDER BY {}",
            T::TABLE,
            OWNER_COLUMN,
            T::ORDER_BY
        );
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(self.owner)
            .fetch_all(conn)
            .await?)
    }

    pub async fn find(&self, conn: &mut PgConnection, id: Uuid) -> Result<T, DatabaseError> {
        self.select_404(conn, id, "").await
    }

    /// Like `find`, holding a row lock until the surrounding transaction ends.
    pub async fn find_locked(&self, conn: &mut PgConnection, id: Uuid) -> Result<T, DatabaseError> {
        self.select_404(conn, id, " FOR UPDATE").await
    }

    async fn select_404(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        suffix: &str,
    ) -> Result<T, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE \"id\" = $1 AND \"{}\" = $2{}",
            T::TABLE,
            OWNER_COLUMN,
            suffix
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(self.owner)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DatabaseError::not_found(T::LABEL))
    }

    pub async fn insert(&self, conn: &mut PgConnection, columns: &ColumnSet) -> Result<T, DatabaseError> {
        insert_owned(T::TABLE, OWNER_COLUMN, self.owner, columns)
            .fetch_one(conn)
            .await
    }

    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        columns: &ColumnSet,
    ) -> Result<T, DatabaseError> {
        update_owned(T::TABLE, OWNER_COLUMN, self.owner, id, columns)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DatabaseError::not_found(T::LABEL))
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: Uuid) -> Result<(), DatabaseError> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE \"id\" = $1 AND \"{}\" = $2",
            T::TABLE,
            OWNER_COLUMN
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(self.owner)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(T::LABEL));
        }
        Ok(())
    }
}
