//! Tier settings: per-owner free-usage limits.

use crate::error::CoreError;

/// Default number of free messages per day.
pub const DEFAULT_FREE_MESSAGE_LIMIT: i32 = 5;

/// Default number of characters available on the free tier.
pub const DEFAULT_FREE_CHARACTER_LIMIT: i32 = 10;

/// Owner slug used when no tenant is configured.
pub const DEFAULT_OWNER_SLUG: &str = "default";

/// Validate tier limit values before persisting.
///
/// Both limits must be non-negative; zero means "feature disabled".
pub fn validate_limits(free_message_limit: i32, free_character_limit: i32) -> Result<(), CoreError> {
    if free_message_limit < 0 {
        return Err(CoreError::Validation(format!(
            "free_message_limit must be >= 0, got {free_message_limit}"
        )));
    }
    if free_character_limit < 0 {
        return Err(CoreError::Validation(format!(
            "free_character_limit must be >= 0, got {free_character_limit}"
        )));
    }
    Ok(())
}
