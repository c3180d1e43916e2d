//! Repository for `places` and its junction tables.
//!
//! Every read goes through one aggregate projection that embeds the
//! service type and segment as objects and the four many-to-many sets as
//! `jsonb` arrays. Filtering renders a [`PlacePredicate`] into a
//! [`QueryBuilder`] with bound parameters, once for the page and once for
//! the count.

use cuide_core::filter::{
    contains_pattern, FilterDimension, PlaceFilter, PlacePredicate, PredicateClause,
};
use cuide_core::pagination::{page_offset, PaginationMetadata, PAGE_SIZE};
use cuide_core::types::{DbId, PublicId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::place::{NewPlace, Place, PlaceRow};

/// Scalar columns of `places` as written by create/update, in bind order.
const SCALAR_COLUMNS: &str = "name, address, phone_number, website, observations, \
    google_maps_link, google_maps_embed_link, service_type_id, segment_id";

/// A many-to-many relation between `places` and a taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Association {
    Regionals,
    ReferenceWays,
    AdmissionCriteria,
    AttendanceTypes,
}

impl Association {
    const ALL: [Association; 4] = [
        Association::Regionals,
        Association::ReferenceWays,
        Association::AdmissionCriteria,
        Association::AttendanceTypes,
    ];

    fn junction_table(self) -> &'static str {
        match self {
            Self::Regionals => "place_regionals",
            Self::ReferenceWays => "place_reference_ways",
            Self::AdmissionCriteria => "place_admission_criteria",
            Self::AttendanceTypes => "place_attendance_types",
        }
    }

    fn foreign_key(self) -> &'static str {
        match self {
            Self::Regionals => "regional_id",
            Self::ReferenceWays => "reference_way_id",
            Self::AdmissionCriteria => "admission_criterion_id",
            Self::AttendanceTypes => "attendance_type_id",
        }
    }

    fn taxonomy_table(self) -> &'static str {
        match self {
            Self::Regionals => "regionals",
            Self::ReferenceWays => "reference_ways",
            Self::AdmissionCriteria => "admission_criteria",
            Self::AttendanceTypes => "attendance_types",
        }
    }

    /// Output column name in the aggregate projection.
    fn column_alias(self) -> &'static str {
        match self {
            Self::Regionals => "regionals",
            Self::ReferenceWays => "reference_ways",
            Self::AdmissionCriteria => "admission_criteria",
            Self::AttendanceTypes => "attendance_types",
        }
    }

    fn ids(self, place: &NewPlace) -> &[DbId] {
        match self {
            Self::Regionals => &place.regional_ids,
            Self::ReferenceWays => &place.reference_way_ids,
            Self::AdmissionCriteria => &place.admission_criterion_ids,
            Self::AttendanceTypes => &place.attendance_type_ids,
        }
    }

    /// Correlated subquery yielding a `jsonb` array of `{id, name}`, `[]`
    /// when the place has no rows in this relation.
    fn aggregate_column(self) -> String {
        format!(
            "COALESCE((SELECT jsonb_agg(jsonb_build_object('id', t.id, 'name', t.name) \
               ORDER BY t.id) \
               FROM {junction} j JOIN {table} t ON t.id = j.{fk} \
               WHERE j.place_id = p.id), '[]'::jsonb) AS {alias}",
            junction = self.junction_table(),
            table = self.taxonomy_table(),
            fk = self.foreign_key(),
            alias = self.column_alias(),
        )
    }
}

/// `SELECT ... FROM places p ...` producing [`PlaceRow`]s, without a WHERE.
fn select_places_sql() -> String {
    let aggregates: Vec<String> = Association::ALL
        .iter()
        .map(|association| association.aggregate_column())
        .collect();
    format!(
        "SELECT p.id, p.name, p.address, p.phone_number, p.website, p.observations, \
            p.google_maps_link, p.google_maps_embed_link, \
            jsonb_build_object('id', st.id, 'name', st.name) AS service_type, \
            jsonb_build_object('id', sg.id, 'name', sg.name) AS segment, \
            {} \
         FROM places p \
         JOIN service_types st ON st.id = p.service_type_id \
         JOIN segments sg ON sg.id = p.segment_id",
        aggregates.join(", ")
    )
}

/// Append ` WHERE TRUE AND <clause> AND ...` for `predicate`.
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &PlacePredicate) {
    builder.push(" WHERE TRUE");
    for clause in predicate.clauses() {
        builder.push(" AND ");
        match clause {
            PredicateClause::IdIn { dimension, ids } => match dimension {
                FilterDimension::ServiceType => {
                    builder.push("p.service_type_id = ANY(");
                    builder.push_bind(ids.clone());
                    builder.push(")");
                }
                FilterDimension::Segment => {
                    builder.push("p.segment_id = ANY(");
                    builder.push_bind(ids.clone());
                    builder.push(")");
                }
                FilterDimension::Regional => {
                    builder.push(
                        "EXISTS (SELECT 1 FROM place_regionals pr \
                         WHERE pr.place_id = p.id AND pr.regional_id = ANY(",
                    );
                    builder.push_bind(ids.clone());
                    builder.push("))");
                }
            },
            PredicateClause::NameContains(text) => {
                let pattern = contains_pattern(text);
                builder.push("(p.name ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(
                    " OR EXISTS (SELECT 1 FROM place_attendance_types pat \
                     JOIN attendance_types aty ON aty.id = pat.attendance_type_id \
                     WHERE pat.place_id = p.id AND aty.name ILIKE ",
                );
                builder.push_bind(pattern);
                builder.push("))");
            }
        }
    }
}

/// Provides listing, filtering and transactional CRUD for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// One page of places ordered by id.
    pub async fn list(pool: &PgPool, page: PublicId) -> Result<Vec<Place>, sqlx::Error> {
        Self::fetch_page(pool, &PlacePredicate::default(), page).await
    }

    /// Find a place by id with its taxonomies embedded.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("{} WHERE p.id = $1", select_places_sql());
        let row = sqlx::query_as::<_, PlaceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Place::from))
    }

    /// One page of places matching `filter`.
    ///
    /// Also returns the predicate that was applied so the caller can count
    /// under exactly the same conditions.
    pub async fn filter(
        pool: &PgPool,
        filter: &PlaceFilter,
        page: PublicId,
    ) -> Result<(Vec<Place>, PlacePredicate), sqlx::Error> {
        let predicate = filter.predicate();
        let places = Self::fetch_page(pool, &predicate, page).await?;
        Ok((places, predicate))
    }

    /// Totals for the unfiltered listing.
    pub async fn pagination_metadata(pool: &PgPool) -> Result<PaginationMetadata, sqlx::Error> {
        Self::filter_pagination_metadata(pool, &PlacePredicate::default()).await
    }

    /// Totals for places matching `predicate`.
    pub async fn filter_pagination_metadata(
        pool: &PgPool,
        predicate: &PlacePredicate,
    ) -> Result<PaginationMetadata, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM places p");
        push_predicate(&mut builder, predicate);
        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;
        Ok(PaginationMetadata::from_total(total))
    }

    /// Insert a place and all its junction rows in one transaction.
    pub async fn create(pool: &PgPool, input: &NewPlace) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO places ({SCALAR_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id"
        );
        let id = sqlx::query_scalar::<_, DbId>(&insert_query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.phone_number)
            .bind(&input.website)
            .bind(&input.observations)
            .bind(&input.google_maps_link)
            .bind(&input.google_maps_embed_link)
            .bind(input.service_type_id)
            .bind(input.segment_id)
            .fetch_one(&mut *tx)
            .await?;

        for association in Association::ALL {
            Self::insert_associations(&mut tx, id, association, association.ids(input)).await?;
        }

        tx.commit().await?;
        tracing::debug!(place_id = id, "Place row and associations inserted");
        Ok(id)
    }

    /// Replace a place's fields and associations in one transaction.
    ///
    /// Returns 0 without touching the junction tables when `id` does not
    /// exist. Otherwise returns the scalar update count plus the number of
    /// junction rows written.
    pub async fn update(pool: &PgPool, id: DbId, input: &NewPlace) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE places SET \
                name = $2, address = $3, phone_number = $4, website = $5, \
                observations = $6, google_maps_link = $7, google_maps_embed_link = $8, \
                service_type_id = $9, segment_id = $10 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(&input.website)
        .bind(&input.observations)
        .bind(&input.google_maps_link)
        .bind(&input.google_maps_embed_link)
        .bind(input.service_type_id)
        .bind(input.segment_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(0);
        }

        let mut affected = updated;
        for association in Association::ALL {
            Self::delete_associations(&mut tx, id, association).await?;
            affected +=
                Self::insert_associations(&mut tx, id, association, association.ids(input)).await?;
        }

        tx.commit().await?;
        Ok(affected)
    }

    /// Delete a place and its junction rows in one transaction.
    ///
    /// Returns the number of place rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for association in Association::ALL {
            Self::delete_associations(&mut tx, id, association).await?;
        }

        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn fetch_page(
        pool: &PgPool,
        predicate: &PlacePredicate,
        page: PublicId,
    ) -> Result<Vec<Place>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(select_places_sql());
        push_predicate(&mut builder, predicate);
        builder.push(" ORDER BY p.id LIMIT ");
        builder.push_bind(PAGE_SIZE);
        builder.push(" OFFSET ");
        builder.push_bind(page_offset(page));

        let rows = builder
            .build_query_as::<PlaceRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Place::from).collect())
    }

    /// Insert one junction row per id within an existing transaction.
    async fn insert_associations(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        place_id: DbId,
        association: Association,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (place_id, {}) VALUES ($1, $2)",
            association.junction_table(),
            association.foreign_key()
        );
        let mut inserted = 0;
        for &taxonomy_id in ids {
            inserted += sqlx::query(&query)
                .bind(place_id)
                .bind(taxonomy_id)
                .execute(&mut **tx)
                .await?
                .rows_affected();
        }
        Ok(inserted)
    }

    async fn delete_associations(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        place_id: DbId,
        association: Association,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE place_id = $1",
            association.junction_table()
        );
        let result = sqlx::query(&query)
            .bind(place_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
