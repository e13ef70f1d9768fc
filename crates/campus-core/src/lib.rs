//! # campus-core: Pure Domain Logic for Campus Coffee
//!
//! This crate holds the rules that decide what a valid Point of Sale (POS)
//! looks like. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Campus Coffee Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP (campus-api routes)                     │   │
//! │  │    POST /api/pos ─ PUT /api/pos/{id} ─ GET /api/pos ...        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              PosService / AdminService (campus-api)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validate_pos_input                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ campus-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   policy   │  │ validation │  │  error   │  │   │
//! │  │   │PointOfSale│  │NameMatching│  │  PosDraft  │  │Validation│  │   │
//! │  │   │ PosInput  │  │ PostalCode │  │  builder   │  │  Error   │  │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  campus-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PointOfSale, PosInput, PosDraft, enums)
//! - [`policy`] - Configurable domain policy (name matching, postal codes)
//! - [`validation`] - The single validation boundary for caller input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use campus_core::{validate_pos_input, PosInput, PosType, ValidationRules};
//!
//! let input = PosInput {
//!     name: "Central Café".to_string(),
//!     description: "Espresso bar".to_string(),
//!     pos_type: "CAFE".to_string(),
//!     campus: "NORTH".to_string(),
//!     street: "Hauptstraße".to_string(),
//!     house_number: "12".to_string(),
//!     postal_code: 69117,
//!     city: "Heidelberg".to_string(),
//!     ..PosInput::default()
//! };
//!
//! let draft = validate_pos_input(&input, &ValidationRules::default()).unwrap();
//! assert_eq!(draft.pos_type, PosType::Cafe);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use policy::{DomainPolicy, NameMatching, PostalCodeRule};
pub use types::*;
pub use validation::{validate_pos_input, ValidationRules};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a POS name (in characters).
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of a POS description (in characters).
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum length of the street and city address components.
pub const MAX_ADDRESS_LEN: usize = 255;

/// Maximum length of a house number such as `12a` or `3-5`.
pub const MAX_HOUSE_NUMBER_LEN: usize = 16;
