//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest accepted player or team name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Validates that a player name is non-blank, within length, and printable.
///
/// # Examples
///
/// ```ignore
/// validate_player_name("R. Adeyemi")   // Ok
/// validate_player_name("   ")          // Err - blank
/// validate_player_name("Tab\there")    // Err - control character
/// ```
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("player_name_blank");
        err.message = Some("Player name must not be blank".into());
        return Err(err);
    }

    if name.len() > MAX_NAME_LENGTH {
        let mut err = ValidationError::new("player_name_length");
        err.message = Some(
            format!(
                "Player name must be at most {MAX_NAME_LENGTH} characters (got {})",
                name.len()
            )
            .into(),
        );
        return Err(err);
    }

    if name.chars().any(char::is_control) {
        let mut err = ValidationError::new("player_name_format");
        err.message = Some("Player name must not contain control characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates a team name with the same rules as player names.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    validate_player_name(name).map_err(|mut err| {
        err.message = err
            .message
            .map(|message| message.replace("Player", "Team").into());
        err
    })
}
