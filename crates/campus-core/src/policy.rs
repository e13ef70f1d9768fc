//! # Domain Policy
//!
//! The knobs of the domain that vary per deployment rather than per request:
//! how names are compared for uniqueness, and what a well-formed postal code
//! looks like.
//!
//! Both are plain values. They are loaded from configuration in the app
//! and passed down explicitly; nothing here reads the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Name Matching
// =============================================================================

/// How two POS names are compared when enforcing uniqueness.
///
/// The chosen policy is baked into the stored `name_key` column, so it must
/// stay fixed for the lifetime of a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// `"Café"` and `"café"` are different names.
    #[default]
    Exact,
    /// `"Café"` and `"café"` collide.
    CaseInsensitive,
}

impl NameMatching {
    /// Returns the uniqueness key for `name` under this policy.
    ///
    /// ```rust
    /// use campus_core::NameMatching;
    ///
    /// assert_eq!(NameMatching::Exact.key("Lib Kiosk"), "Lib Kiosk");
    /// assert_eq!(NameMatching::CaseInsensitive.key("Lib Kiosk"), "lib kiosk");
    /// ```
    pub fn key(self, name: &str) -> String {
        match self {
            NameMatching::Exact => name.to_string(),
            NameMatching::CaseInsensitive => name.to_lowercase(),
        }
    }

    /// Configuration spelling, also what a database records.
    pub fn as_str(self) -> &'static str {
        match self {
            NameMatching::Exact => "exact",
            NameMatching::CaseInsensitive => "case_insensitive",
        }
    }
}

impl fmt::Display for NameMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(NameMatching::Exact),
            "case_insensitive" => Ok(NameMatching::CaseInsensitive),
            other => Err(format!(
                "unknown name matching '{other}', expected 'exact' or 'case_insensitive'"
            )),
        }
    }
}

// =============================================================================
// Postal Code Rule
// =============================================================================

/// Accepted digit-length range for integer postal codes.
///
/// Postal codes travel as integers, so a leading zero is lost: the German
/// code `01067` arrives as `1067`. The German preset therefore accepts four
/// or five digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeRule {
    pub min_digits: u8,
    pub max_digits: u8,
}

impl PostalCodeRule {
    /// German postal codes (`01001` – `99998`).
    pub const fn germany() -> Self {
        PostalCodeRule {
            min_digits: 4,
            max_digits: 5,
        }
    }

    /// A locale where every code has exactly `digits` digits.
    pub const fn fixed(digits: u8) -> Self {
        PostalCodeRule {
            min_digits: digits,
            max_digits: digits,
        }
    }

    /// Smallest accepted value.
    pub fn min_value(&self) -> u32 {
        if self.min_digits <= 1 {
            0
        } else {
            10u32
                .checked_pow(u32::from(self.min_digits) - 1)
                .unwrap_or(u32::MAX)
        }
    }

    /// Largest accepted value.
    pub fn max_value(&self) -> u32 {
        10u32
            .checked_pow(u32::from(self.max_digits))
            .map_or(u32::MAX, |v| v - 1)
    }

    /// Checks that the rule itself is usable.
    ///
    /// `max_digits` is capped at 9 so every accepted code fits in a `u32`.
    pub fn check(&self) -> Result<(), String> {
        if self.min_digits == 0 {
            return Err("postal_code.min_digits must be at least 1".to_string());
        }
        if self.max_digits > 9 {
            return Err("postal_code.max_digits must be at most 9".to_string());
        }
        if self.min_digits > self.max_digits {
            return Err(format!(
                "postal_code.min_digits ({}) exceeds max_digits ({})",
                self.min_digits, self.max_digits
            ));
        }
        Ok(())
    }
}

impl Default for PostalCodeRule {
    fn default() -> Self {
        PostalCodeRule::germany()
    }
}

// =============================================================================
// Domain Policy
// =============================================================================

/// Everything configurable about the POS domain, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainPolicy {
    pub name_matching: NameMatching,
    pub postal_code: PostalCodeRule,
}

// =============================================================================
// Unit Tests
// =============================================================================
