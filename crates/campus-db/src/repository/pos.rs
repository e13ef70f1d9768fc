//! # Point of Sale Repository
//!
//! Database operations for Points of Sale.
//!
//! ## Key Operations
//! - Append-only inserts with storage-assigned ids
//! - Whole-record updates by id
//! - Creation-ordered listing
//! - Lookup by name under the configured matching policy
//! - Bulk clear for test isolation
//!
//! ## Uniqueness Backstop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two writers, one name                                │
//! │                                                                         │
//! │  Writer A: get_by_name("Lib Kiosk") → None                             │
//! │  Writer B: get_by_name("Lib Kiosk") → None                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Writer A: INSERT ... name_key = 'Lib Kiosk'   ✓ commits               │
//! │  Writer B: INSERT ... name_key = 'Lib Kiosk'   ✗ UNIQUE constraint     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  B gets DbError::UniqueViolation { field: "name", value: "Lib Kiosk" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use campus_core::{NameMatching, PointOfSale, PosDraft};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const ENTITY: &str = "PointOfSale";

/// Repository for Point of Sale database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.points_of_sale();
///
/// let pos = repo.insert(&draft, Utc::now()).await?;
/// let all = repo.find_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PosRepository {
    pool: SqlitePool,
    name_matching: NameMatching,
}

impl PosRepository {
    /// Creates a new PosRepository.
    pub fn new(pool: SqlitePool, name_matching: NameMatching) -> Self {
        PosRepository {
            pool,
            name_matching,
        }
    }

    /// Inserts a new Point of Sale.
    ///
    /// `created_at` and `updated_at` are both set to `now`; the id is
    /// assigned by SQLite.
    ///
    /// ## Returns
    /// * `Ok(PointOfSale)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Name key already taken
    pub async fn insert(&self, draft: &PosDraft, now: DateTime<Utc>) -> DbResult<PointOfSale> {
        debug!(name = %draft.name, "Inserting point of sale");

        let pos = sqlx::query_as::<_, PointOfSale>(
            r#"
            INSERT INTO points_of_sale (
                name, name_key, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8, ?9,
                ?10, ?11
            )
            RETURNING
                id, name, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(self.name_matching.key(&draft.name))
        .bind(&draft.description)
        .bind(draft.pos_type)
        .bind(draft.campus)
        .bind(&draft.street)
        .bind(&draft.house_number)
        .bind(draft.postal_code)
        .bind(&draft.city)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| name_conflict(e, &draft.name))?;

        debug!(id = pos.id, "Inserted point of sale");
        Ok(pos)
    }

    /// Replaces every caller-owned field of an existing Point of Sale.
    ///
    /// `id` and `created_at` are never touched.
    ///
    /// ## Returns
    /// * `Ok(PointOfSale)` - The stored row after the update
    /// * `Err(DbError::NotFound)` - No record with this id
    /// * `Err(DbError::UniqueViolation)` - Name key owned by another record
    pub async fn update(
        &self,
        id: i64,
        draft: &PosDraft,
        updated_at: DateTime<Utc>,
    ) -> DbResult<PointOfSale> {
        debug!(id = id, name = %draft.name, "Updating point of sale");

        let pos = sqlx::query_as::<_, PointOfSale>(
            r#"
            UPDATE points_of_sale SET
                name = ?2,
                name_key = ?3,
                description = ?4,
                pos_type = ?5,
                campus = ?6,
                street = ?7,
                house_number = ?8,
                postal_code = ?9,
                city = ?10,
                updated_at = ?11
            WHERE id = ?1
            RETURNING
                id, name, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(self.name_matching.key(&draft.name))
        .bind(&draft.description)
        .bind(draft.pos_type)
        .bind(draft.campus)
        .bind(&draft.street)
        .bind(&draft.house_number)
        .bind(draft.postal_code)
        .bind(&draft.city)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| name_conflict(e, &draft.name))?;

        pos.ok_or_else(|| DbError::not_found(ENTITY, id.to_string()))
    }

    /// Lists every Point of Sale in creation order.
    pub async fn find_all(&self) -> DbResult<Vec<PointOfSale>> {
        let all = sqlx::query_as::<_, PointOfSale>(
            r#"
            SELECT
                id, name, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            FROM points_of_sale
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = all.len(), "Listed points of sale");
        Ok(all)
    }

    /// Gets a Point of Sale by id.
    ///
    /// ## Returns
    /// * `Ok(Some(PointOfSale))` - Found
    /// * `Ok(None)` - Not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<PointOfSale>> {
        let pos = sqlx::query_as::<_, PointOfSale>(
            r#"
            SELECT
                id, name, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            FROM points_of_sale
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pos)
    }

    /// Gets a Point of Sale by name, compared under the matching policy.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<PointOfSale>> {
        let pos = sqlx::query_as::<_, PointOfSale>(
            r#"
            SELECT
                id, name, description, pos_type, campus,
                street, house_number, postal_code, city,
                created_at, updated_at
            FROM points_of_sale
            WHERE name_key = ?1
            "#,
        )
        .bind(self.name_matching.key(name))
        .fetch_optional(&self.pool)
        .await?;

        Ok(pos)
    }

    /// Finds a Point of Sale by name.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No record holds this name
    pub async fn find_by_name(&self, name: &str) -> DbResult<PointOfSale> {
        self.get_by_name(name)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, name))
    }

    /// Counts stored records (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM points_of_sale")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Removes every record. Idempotent.
    ///
    /// The AUTOINCREMENT sequence survives, so ids handed out before the
    /// clear are never reissued.
    ///
    /// ## Returns
    /// The number of removed records.
    pub async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM points_of_sale")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Cleared points of sale");
        Ok(result.rows_affected())
    }
}

/// Attaches the offending name to a unique violation.
fn name_conflict(err: sqlx::Error, name: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("name", name),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
