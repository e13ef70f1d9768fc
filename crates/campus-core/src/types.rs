//! # Domain Types
//!
//! Core domain types for the campus POS directory.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  validate  ┌─────────────────┐  persist           │
//! │  │    PosInput     │ ─────────► │    PosDraft     │ ─────────┐         │
//! │  │  ─────────────  │            │  ─────────────  │          │         │
//! │  │  raw strings    │            │  typed enums    │          ▼         │
//! │  │  type, campus   │            │  PosType        │  ┌─────────────────┐│
//! │  │  postalCode i64 │            │  CampusType     │  │  PointOfSale    ││
//! │  │  optional id    │            │  postal u32     │  │  ─────────────  ││
//! │  └─────────────────┘            └─────────────────┘  │  id (storage)   ││
//! │                                                       │  createdAt      ││
//! │                                                       │  updatedAt      ││
//! │                                                       └─────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `id`: assigned by storage, immutable, never reused
//! - `name`: business key, unique among live records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// POS Type
// =============================================================================

/// Classification of a Point of Sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    /// Sit-down café with a counter.
    Cafe,
    /// Small stand or window.
    Kiosk,
    /// Unattended vending machine.
    Vending,
    /// Bakery that also serves coffee.
    Bakery,
    /// Canteen-style cafeteria.
    Cafeteria,
}

impl PosType {
    /// Every member, in declaration order.
    pub const ALL: [PosType; 5] = [
        PosType::Cafe,
        PosType::Kiosk,
        PosType::Vending,
        PosType::Bakery,
        PosType::Cafeteria,
    ];

    /// Returns the wire/storage spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PosType::Cafe => "CAFE",
            PosType::Kiosk => "KIOSK",
            PosType::Vending => "VENDING",
            PosType::Bakery => "BAKERY",
            PosType::Cafeteria => "CAFETERIA",
        }
    }
}

impl fmt::Display for PosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosType {
    type Err = UnknownVariant;

    /// Exact, case-sensitive match against the wire spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PosType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

// =============================================================================
// Campus Type
// =============================================================================

/// Campus location a Point of Sale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    North,
    South,
    Altstadt,
    Bergheim,
    Inf,
}

impl CampusType {
    /// Every member, in declaration order.
    pub const ALL: [CampusType; 5] = [
        CampusType::North,
        CampusType::South,
        CampusType::Altstadt,
        CampusType::Bergheim,
        CampusType::Inf,
    ];

    /// Returns the wire/storage spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CampusType::North => "NORTH",
            CampusType::South => "SOUTH",
            CampusType::Altstadt => "ALTSTADT",
            CampusType::Bergheim => "BERGHEIM",
            CampusType::Inf => "INF",
        }
    }
}

impl fmt::Display for CampusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampusType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampusType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A string that is not a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

// =============================================================================
// Point of Sale
// =============================================================================

/// A coffee-serving location on campus, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PointOfSale {
    /// Storage-assigned identifier. Never reused.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name, unique among live records.
    pub name: String,

    /// Free text; empty when the caller gave none.
    pub description: String,

    /// Classification.
    #[serde(rename = "type")]
    pub pos_type: PosType,

    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: u32,
    pub city: String,

    /// When the record was created. Immutable.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the record was last mutated. Never moves backwards.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl PointOfSale {
    /// Returns the caller-owned fields of this record as a draft.
    pub fn to_draft(&self) -> PosDraft {
        PosDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            pos_type: self.pos_type,
            campus: self.campus,
            street: self.street.clone(),
            house_number: self.house_number.clone(),
            postal_code: self.postal_code,
            city: self.city.clone(),
        }
    }
}

// =============================================================================
// POS Input (raw draft)
// =============================================================================

/// Caller-supplied input for create/update, exactly as it arrives.
///
/// Nothing here is trusted. `type` and `campus` stay strings and
/// `postalCode` stays signed so that the validation boundary can report
/// precisely what was wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PosInput {
    /// Only present when a client echoes back a stored record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type")]
    pub pos_type: String,

    pub campus: String,
    pub street: String,
    pub house_number: String,

    #[ts(type = "number")]
    pub postal_code: i64,

    pub city: String,
}

impl From<&PointOfSale> for PosInput {
    fn from(pos: &PointOfSale) -> Self {
        PosInput {
            id: Some(pos.id),
            name: pos.name.clone(),
            description: pos.description.clone(),
            pos_type: pos.pos_type.as_str().to_string(),
            campus: pos.campus.as_str().to_string(),
            street: pos.street.clone(),
            house_number: pos.house_number.clone(),
            postal_code: i64::from(pos.postal_code),
            city: pos.city.clone(),
        }
    }
}

// =============================================================================
// POS Draft (validated)
// =============================================================================

/// A validated, normalized draft ready to be persisted.
///
/// Only [`crate::validation::validate_pos_input`] builds one from caller
/// input, so holding a `PosDraft` means every structural rule passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosDraft {
    pub name: String,
    pub description: String,
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: u32,
    pub city: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> PointOfSale {
        let at = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
        PointOfSale {
            id: 7,
            name: "Central Café".to_string(),
            description: "Espresso bar".to_string(),
            pos_type: PosType::Cafe,
            campus: CampusType::North,
            street: "Hauptstraße".to_string(),
            house_number: "12".to_string(),
            postal_code: 69117,
            city: "Heidelberg".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_pos_type_parse_is_exact() {
        assert_eq!("CAFE".parse::<PosType>(), Ok(PosType::Cafe));
        assert_eq!("VENDING".parse::<PosType>(), Ok(PosType::Vending));
        assert!("cafe".parse::<PosType>().is_err());
        assert!("CAFE ".parse::<PosType>().is_err());
    }

    #[test]
    fn test_campus_type_parse_is_exact() {
        assert_eq!("SOUTH".parse::<CampusType>(), Ok(CampusType::South));
        assert_eq!(
            "EAST".parse::<CampusType>(),
            Err(UnknownVariant("EAST".to_string()))
        );
    }

    #[test]
    fn test_point_of_sale_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "CAFE");
        assert_eq!(json["campus"], "NORTH");
        assert_eq!(json["houseNumber"], "12");
        assert_eq!(json["postalCode"], 69117);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_input_from_point_of_sale_keeps_id() {
        let pos = sample();
        let input = PosInput::from(&pos);
        assert_eq!(input.id, Some(7));
        assert_eq!(input.pos_type, "CAFE");
        assert_eq!(input.postal_code, 69117);
    }

    #[test]
    fn test_input_description_defaults_to_empty() {
        let input: PosInput = serde_json::from_str(
            r#"{"name":"Lib Kiosk","type":"KIOSK","campus":"SOUTH",
                "street":"Plöck","houseNumber":"107","postalCode":69117,
                "city":"Heidelberg"}"#,
        )
        .unwrap();
        assert_eq!(input.description, "");
        assert_eq!(input.id, None);
    }
}
