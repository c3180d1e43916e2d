//! Repository for the six taxonomy tables.
//!
//! All taxonomies share the `(id, name)` shape, so one generic repository
//! serves them; the table name comes from the [`Taxonomy`] marker.

use std::marker::PhantomData;

use cuide_core::taxonomy::Taxonomy;
use cuide_core::types::DbId;
use sqlx::PgPool;

use crate::models::taxonomy::{TaxonomyEntry, TaxonomyForm};

/// Column list shared by every taxonomy table.
const COLUMNS: &str = "id, name";

/// CRUD operations for the taxonomy identified by `T`.
pub struct TaxonomyRepo<T>(PhantomData<T>);

impl<T: Taxonomy> TaxonomyRepo<T> {
    /// List every entry in ascending id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<TaxonomyEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id", T::TABLE);
        sqlx::query_as::<_, TaxonomyEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an entry by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TaxonomyEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", T::TABLE);
        sqlx::query_as::<_, TaxonomyEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &TaxonomyForm,
    ) -> Result<TaxonomyEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {COLUMNS}",
            T::TABLE
        );
        let entry = sqlx::query_as::<_, TaxonomyEntry>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await?;
        tracing::debug!(table = T::TABLE, id = entry.id, "Taxonomy entry created");
        Ok(entry)
    }

    /// Rename an entry. Returns the number of rows changed (0 or 1).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &TaxonomyForm,
    ) -> Result<u64, sqlx::Error> {
        let query = format!("UPDATE {} SET name = $2 WHERE id = $1", T::TABLE);
        let result = sqlx::query(&query)
            .bind(id)
            .bind(&input.name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete an entry. Returns the number of rows removed (0 or 1).
    ///
    /// Fails with a foreign-key violation while places still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }
}
