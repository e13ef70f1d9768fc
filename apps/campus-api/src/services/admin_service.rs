//! Admin service implementation.
//!
//! Operations that are not part of the public POS contract. Holding an
//! [`AdminService`] is the capability; the HTTP route is only mounted when
//! `admin.enabled` is set.

use campus_db::PosRepository;
use tracing::info;

use crate::error::ServiceResult;

/// Admin service implementation.
#[derive(Debug, Clone)]
pub struct AdminService {
    repo: PosRepository,
}

impl AdminService {
    /// Create a new admin service.
    pub fn new(repo: PosRepository) -> Self {
        AdminService { repo }
    }

    /// Removes every Point of Sale. Idempotent.
    ///
    /// Returns how many records were removed.
    pub async fn clear(&self) -> ServiceResult<u64> {
        let removed = self.repo.clear().await?;
        info!(removed, "Cleared all points of sale");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_clear_on_empty_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let admin = AdminService::new(db.points_of_sale());

        assert_eq!(admin.clear().await.unwrap(), 0);
        assert_eq!(admin.clear().await.unwrap(), 0);
    }
}
