//! # Campus Coffee API
//!
//! HTTP/JSON server for the campus POS directory.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Campus API                                      │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes        │  │  PosService    │  │  AdminService              ││
//! │  │  (axum)        │  │                │  │                            ││
//! │  │ • /api/pos     │─►│ • create       │  │ • clear                    ││
//! │  │ • /api/admin   │  │ • update       │  │   (mounted only when       ││
//! │  │ • /health      │  │ • list         │  │    admin.enabled)          ││
//! │  │                │  │ • get_by_name  │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                              │                       │                  │
//! │                              ▼                       ▼                  │
//! │                   campus-db::PosRepository (SQLite)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]. Every key can be overridden with a `CAMPUS__` env var:
//! - `CAMPUS__HTTP_ADDR` - Listen address (default: 0.0.0.0:8080)
//! - `CAMPUS__DATABASE__PATH` - SQLite file (default: campus-coffee.db)
//! - `CAMPUS__DOMAIN__NAME_MATCHING` - `exact` or `case_insensitive`
//! - `CAMPUS__ADMIN__ENABLED` - Mount the clear route (default: false)

pub mod config;
pub mod error;
pub mod routes;
pub mod services;

use campus_core::ValidationRules;
use campus_db::Database;

// Re-exports
pub use config::AppConfig;
pub use error::{ApiError, ErrorCode, ServiceError};
pub use routes::build_router;
pub use services::{AdminService, PosService};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub pos: PosService,
    pub admin: AdminService,
}

impl AppState {
    /// Wires the services over one database handle.
    pub fn new(db: Database, rules: ValidationRules) -> Self {
        AppState {
            pos: PosService::new(db.points_of_sale(), rules),
            admin: AdminService::new(db.points_of_sale()),
            db,
        }
    }
}
