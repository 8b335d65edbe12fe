//! Roundtable settings document: defaults, per-tier limits, and locks.
//!
//! Stored per owner as three JSON columns. The built-in defaults double as
//! the fallback when an owner has no stored row, and as the base for merging
//! partial rows read from older deployments.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Default knob values applied to a new roundtable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundtableDefaults {
    pub replies_per_round: i32,
    pub follow_ups_per_round: i32,
    pub max_words_per_reply: i32,
    pub allow_all_speak: bool,
    pub strict_rotation: bool,
    pub creativity: f64,
    pub max_participants: i32,
    pub save_by_default: bool,
    pub enable_advance_round: bool,
}

/// An inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Adjustable ranges available to one account tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TierLimits {
    pub replies_per_round: Range,
    pub follow_ups_per_round: Range,
    pub max_words_per_reply: Range,
    pub creativity: Range,
    pub max_participants: i32,
}

/// Per-tier limits. Free caps are slightly lower; premium carries the widest
/// ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtableLimits {
    pub free: TierLimits,
    pub premium: TierLimits,
}

/// Which toggles an owner has locked against end-user changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundtableLocks {
    pub allow_all_speak: bool,
    pub strict_rotation: bool,
    pub enable_advance_round: bool,
    pub save_by_default: bool,
}

/// The full settings document for one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundtableSettings {
    pub defaults: RoundtableDefaults,
    pub limits: RoundtableLimits,
    pub locks: RoundtableLocks,
}

// ---------------------------------------------------------------------------
// Built-in defaults
// ---------------------------------------------------------------------------

impl Default for RoundtableDefaults {
    fn default() -> Self {
        Self {
            replies_per_round: 3,
            follow_ups_per_round: 2,
            max_words_per_reply: 110,
            allow_all_speak: false,
            strict_rotation: false,
            creativity: 0.7,
            max_participants: 8,
            save_by_default: true,
            enable_advance_round: true,
        }
    }
}

impl Default for RoundtableLimits {
    fn default() -> Self {
        Self {
            free: TierLimits {
                replies_per_round: Range { min: 1.0, max: 4.0 },
                follow_ups_per_round: Range { min: 0.0, max: 2.0 },
                max_words_per_reply: Range {
                    min: 60.0,
                    max: 140.0,
                },
                creativity: Range { min: 0.2, max: 0.9 },
                max_participants: 8,
            },
            premium: TierLimits {
                replies_per_round: Range { min: 1.0, max: 6.0 },
                follow_ups_per_round: Range { min: 0.0, max: 3.0 },
                max_words_per_reply: Range {
                    min: 60.0,
                    max: 160.0,
                },
                creativity: Range { min: 0.2, max: 1.0 },
                max_participants: 12,
            },
        }
    }
}

impl Default for RoundtableLocks {
    fn default() -> Self {
        Self {
            allow_all_speak: false,
            strict_rotation: false,
            enable_advance_round: false,
            save_by_default: false,
        }
    }
}

impl Default for RoundtableSettings {
    fn default() -> Self {
        Self {
            defaults: RoundtableDefaults::default(),
            limits: RoundtableLimits::default(),
            locks: RoundtableLocks::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that every configured range satisfies `min <= max`.
pub fn validate_limits(limits: &RoundtableLimits) -> Result<(), CoreError> {
    for (tier, tier_limits) in [("free", &limits.free), ("premium", &limits.premium)] {
        for (field, range) in [
            ("replies_per_round", tier_limits.replies_per_round),
            ("follow_ups_per_round", tier_limits.follow_ups_per_round),
            ("max_words_per_reply", tier_limits.max_words_per_reply),
            ("creativity", tier_limits.creativity),
        ] {
            if range.min > range.max {
                return Err(CoreError::Validation(format!(
                    "{tier}.{field}: min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        if tier_limits.max_participants < 1 {
            return Err(CoreError::Validation(format!(
                "{tier}.max_participants must be >= 1, got {}",
                tier_limits.max_participants
            )));
        }
    }
    Ok(())
}

/// Validate a defaults object against a tier's limits.
///
/// Each numeric default must lie within its configured range, and
/// `max_participants` within `1..=cap`.
pub fn validate_defaults(
    defaults: &RoundtableDefaults,
    limits: &TierLimits,
) -> Result<(), CoreError> {
    for (field, value, range) in [
        (
            "replies_per_round",
            defaults.replies_per_round as f64,
            limits.replies_per_round,
        ),
        (
            "follow_ups_per_round",
            defaults.follow_ups_per_round as f64,
            limits.follow_ups_per_round,
        ),
        (
            "max_words_per_reply",
            defaults.max_words_per_reply as f64,
            limits.max_words_per_reply,
        ),
        ("creativity", defaults.creativity, limits.creativity),
    ] {
        if !range.contains(value) {
            return Err(CoreError::Validation(format!(
                "{field} must be within [{}, {}], got {value}",
                range.min, range.max
            )));
        }
    }

    if defaults.max_participants < 1 || defaults.max_participants > limits.max_participants {
        return Err(CoreError::Validation(format!(
            "max_participants must be within [1, {}], got {}",
            limits.max_participants, defaults.max_participants
        )));
    }

    Ok(())
}

/// Validate a full settings document before persisting it.
///
/// Defaults are checked against the premium tier (the widest ranges), so a
/// document valid for premium users is accepted even when it exceeds free
/// caps.
pub fn validate_settings(settings: &RoundtableSettings) -> Result<(), CoreError> {
    validate_limits(&settings.limits)?;
    validate_defaults(&settings.defaults, &settings.limits.premium)
}
