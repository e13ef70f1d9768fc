//! # Validation Module
//!
//! The single boundary where untrusted [`PosInput`] becomes a [`PosDraft`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (campus-api)                                            │
//! │  └── JSON deserialization (shape, types)                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / length checks                                          │
//! │  ├── Closed enumerations (type, campus)                                │
//! │  └── Postal code digit range                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(name_key)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors report the first failing field, in declaration order.

use crate::error::ValidationError;
use crate::policy::{DomainPolicy, PostalCodeRule};
use crate::types::{CampusType, PosDraft, PosInput, PosType};
use crate::{MAX_ADDRESS_LEN, MAX_DESCRIPTION_LEN, MAX_HOUSE_NUMBER_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rules the validator needs from the deployment's policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    pub postal_code: PostalCodeRule,
}

impl From<&DomainPolicy> for ValidationRules {
    fn from(policy: &DomainPolicy) -> Self {
        ValidationRules {
            postal_code: policy.postal_code,
        }
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Validates and normalizes a caller draft.
///
/// ## Rules
/// - `name`, `street`, `houseNumber`, `city`: required (non-blank)
/// - all text is trimmed, then length-checked
/// - `type`, `campus`: exact members of their enumerations
/// - `postalCode`: within the configured digit range
///
/// The `id` field is not looked at here; see [`validate_input_id`].
pub fn validate_pos_input(
    input: &PosInput,
    rules: &ValidationRules,
) -> ValidationResult<PosDraft> {
    let name = required_text("name", &input.name, MAX_NAME_LEN)?;
    let description = optional_text("description", &input.description, MAX_DESCRIPTION_LEN)?;
    let pos_type = parse_pos_type(&input.pos_type)?;
    let campus = parse_campus(&input.campus)?;
    let street = required_text("street", &input.street, MAX_ADDRESS_LEN)?;
    let house_number = validate_house_number(&input.house_number)?;
    let postal_code = validate_postal_code(input.postal_code, &rules.postal_code)?;
    let city = required_text("city", &input.city, MAX_ADDRESS_LEN)?;

    Ok(PosDraft {
        name,
        description,
        pos_type,
        campus,
        street,
        house_number,
        postal_code,
        city,
    })
}

/// Checks the optional `id` a caller put in the payload.
///
/// ## Rules
/// - `target = None` (create): the payload must not carry an id
/// - `target = Some(id)` (update): the payload id, if any, must equal `id`
pub fn validate_input_id(input: &PosInput, target: Option<i64>) -> ValidationResult<()> {
    match (input.id, target) {
        (None, _) => Ok(()),
        (Some(given), Some(expected)) if given == expected => Ok(()),
        (Some(given), expected) => Err(ValidationError::IdentifierMismatch {
            expected: expected.map_or_else(|| "none".to_string(), |id| id.to_string()),
            given: given.to_string(),
        }),
    }
}

// =============================================================================
// String Validators
// =============================================================================

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }

    Ok(value.to_string())
}

fn optional_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }

    Ok(value.to_string())
}

/// Validates a house number such as `12`, `12a`, `3-5` or `7 / 1`.
pub fn validate_house_number(value: &str) -> ValidationResult<String> {
    let value = required_text("houseNumber", value, MAX_HOUSE_NUMBER_LEN)?;

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '/' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "houseNumber".to_string(),
            reason: "must contain only letters, digits, '-', '/' and spaces".to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Enumeration Validators
// =============================================================================

/// Parses a POS classification. Matching is exact: `cafe` is rejected.
pub fn parse_pos_type(value: &str) -> ValidationResult<PosType> {
    value.parse().map_err(|_| ValidationError::NotAllowed {
        field: "type".to_string(),
        value: value.to_string(),
        allowed: PosType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
    })
}

/// Parses a campus. Matching is exact.
pub fn parse_campus(value: &str) -> ValidationResult<CampusType> {
    value.parse().map_err(|_| ValidationError::NotAllowed {
        field: "campus".to_string(),
        value: value.to_string(),
        allowed: CampusType::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an integer postal code against a locale rule.
///
/// ## Example
/// ```rust
/// use campus_core::validation::validate_postal_code;
/// use campus_core::PostalCodeRule;
///
/// let de = PostalCodeRule::germany();
/// assert_eq!(validate_postal_code(69117, &de), Ok(69117));
/// assert!(validate_postal_code(-1, &de).is_err());
/// assert!(validate_postal_code(123, &de).is_err());
/// assert!(validate_postal_code(123456, &de).is_err());
/// ```
pub fn validate_postal_code(value: i64, rule: &PostalCodeRule) -> ValidationResult<u32> {
    if value < 0 {
        return Err(ValidationError::OutOfRange {
            field: "postalCode".to_string(),
            min: i64::from(rule.min_value()),
            max: i64::from(rule.max_value()),
        });
    }

    let digits = value.to_string().len();
    if digits < usize::from(rule.min_digits) || digits > usize::from(rule.max_digits) {
        let reason = if rule.min_digits == rule.max_digits {
            format!("must have {} digits", rule.min_digits)
        } else {
            format!(
                "must have between {} and {} digits",
                rule.min_digits, rule.max_digits
            )
        };
        return Err(ValidationError::InvalidFormat {
            field: "postalCode".to_string(),
            reason,
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field: "postalCode".to_string(),
        min: i64::from(rule.min_value()),
        max: i64::from(rule.max_value()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
