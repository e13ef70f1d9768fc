//! # POS Service
//!
//! Domain rules above storage.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create / update                                      │
//! │                                                                         │
//! │  PosInput (untrusted)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_input_id ──► validate_pos_input ──► PosDraft                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update only: resolve target by id (NotFound)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Name pre-check: held by another record? (DuplicateName)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PosRepository insert/update                                           │
//! │  └── UNIQUE(name_key) catches writers that raced the pre-check         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use campus_core::validation::validate_input_id;
use campus_core::{validate_pos_input, PointOfSale, PosInput, ValidationRules};
use campus_db::{DbError, PosRepository};
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};

const ENTITY: &str = "PointOfSale";

/// POS service implementation.
///
/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct PosService {
    repo: PosRepository,
    rules: ValidationRules,
}

impl PosService {
    /// Create a new POS service.
    pub fn new(repo: PosRepository, rules: ValidationRules) -> Self {
        PosService { repo, rules }
    }

    /// Creates a Point of Sale from caller input.
    ///
    /// ## Errors
    /// * `Validation` - Malformed input, or input that carries an id
    /// * `DuplicateName` - The name is held by a live record
    pub async fn create(&self, input: &PosInput) -> ServiceResult<PointOfSale> {
        validate_input_id(input, None)?;
        let draft = validate_pos_input(input, &self.rules)?;

        if self.repo.get_by_name(&draft.name).await?.is_some() {
            warn!(name = %draft.name, "Create rejected: name already taken");
            return Err(ServiceError::DuplicateName { name: draft.name });
        }

        let pos = self
            .repo
            .insert(&draft, Utc::now())
            .await
            .map_err(|e| rejected("Create", e))?;

        info!(id = pos.id, name = %pos.name, "Created point of sale");
        Ok(pos)
    }

    /// Replaces every caller-owned field of the record `id`.
    ///
    /// `updatedAt` is set to now, but never earlier than the stored value.
    ///
    /// ## Errors
    /// * `Validation` - Malformed input, or a body id that differs from `id`
    /// * `NotFound` - No record with this id
    /// * `DuplicateName` - The new name is held by a different record
    pub async fn update(&self, id: i64, input: &PosInput) -> ServiceResult<PointOfSale> {
        validate_input_id(input, Some(id))?;
        let draft = validate_pos_input(input, &self.rules)?;

        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))?;

        if let Some(holder) = self.repo.get_by_name(&draft.name).await? {
            if holder.id != id {
                warn!(id, holder = holder.id, name = %draft.name, "Update rejected: name already taken");
                return Err(ServiceError::DuplicateName { name: draft.name });
            }
        }

        if existing.to_draft() == draft {
            debug!(id, "Update carries no field changes");
        }

        let updated_at = Utc::now().max(existing.updated_at);
        let pos = self
            .repo
            .update(id, &draft, updated_at)
            .await
            .map_err(|e| rejected("Update", e))?;

        info!(id = pos.id, name = %pos.name, "Updated point of sale");
        Ok(pos)
    }

    /// Lists every Point of Sale in creation order.
    pub async fn list(&self) -> ServiceResult<Vec<PointOfSale>> {
        Ok(self.repo.find_all().await?)
    }

    /// Looks up a Point of Sale by name.
    ///
    /// The name is trimmed like it is on write, so any name a draft was
    /// accepted with finds its record.
    pub async fn get_by_name(&self, name: &str) -> ServiceResult<PointOfSale> {
        let name = name.trim();
        debug!(name, "Looking up point of sale by name");
        Ok(self.repo.find_by_name(name).await?)
    }

    /// Looks up a Point of Sale by id.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<PointOfSale> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }
}

/// Converts a failed write, logging the domain rejections the pre-check
/// could not see. Storage failures are logged where they become responses.
fn rejected(op: &str, err: DbError) -> ServiceError {
    if err.is_domain() {
        warn!(op, error = %err, "Write rejected after pre-check passed");
    }
    ServiceError::from(err)
}

// =============================================================================
// Unit Tests
// =============================================================================
