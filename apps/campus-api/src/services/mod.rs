//! Service layer.
//!
//! - [`pos_service`] - Create, update and look up Points of Sale
//! - [`admin_service`] - Privileged maintenance (reset between scenarios)

pub mod admin_service;
pub mod pos_service;

pub use admin_service::AdminService;
pub use pos_service::PosService;
