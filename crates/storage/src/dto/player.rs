use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validate_emoji;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlayerResponse {
    pub player_id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub emoji: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 255))]
    pub nickname: Option<String>,

    #[validate(custom(function = "validate_emoji"))]
    pub emoji: Option<String>,
}

/// Request payload for updating an existing player
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePlayerRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub nickname: Option<String>,

    #[validate(custom(function = "validate_emoji"))]
    pub emoji: Option<String>,
}

impl From<crate::models::Player> for PlayerResponse {
    fn from(player: crate::models::Player) -> Self {
        Self {
            player_id: player.player_id,
            name: player.name,
            nickname: player.nickname,
            emoji: player.emoji,
            created_at: player.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_player_validation() {
        let valid = CreatePlayerRequest {
            name: "Alice".to_string(),
            nickname: Some("The Wall".to_string()),
            emoji: Some("🧱".to_string()),
        };
        assert!(valid.validate().is_ok());

        let blank = CreatePlayerRequest {
            name: String::new(),
            ..valid.clone()
        };
        assert!(blank.validate().is_err());

        let long_emoji = CreatePlayerRequest {
            emoji: Some("🧱".repeat(20)),
            ..valid
        };
        assert!(long_emoji.validate().is_err());
    }
}
