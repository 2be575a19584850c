use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validate_emoji;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub name: String,
    pub emoji: Option<String>,
    pub player_one_id: Uuid,
    pub player_two_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new team. Member order is irrelevant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_members"))]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_emoji"))]
    pub emoji: Option<String>,

    pub player_one_id: Uuid,

    pub player_two_id: Uuid,
}

/// Request payload for updating an existing team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_emoji"))]
    pub emoji: Option<String>,

    pub player_one_id: Option<Uuid>,

    pub player_two_id: Option<Uuid>,
}

fn validate_distinct_members(req: &CreateTeamRequest) -> Result<(), validator::ValidationError> {
    if req.player_one_id == req.player_two_id {
        let mut error = validator::ValidationError::new("same_player");
        error.message = Some("A team needs two different players".into());
        return Err(error);
    }
    Ok(())
}

impl From<crate::models::Team> for TeamResponse {
    fn from(team: crate::models::Team) -> Self {
        Self {
            team_id: team.team_id,
            name: team.name,
            emoji: team.emoji,
            player_one_id: team.player_one_id,
            player_two_id: team.player_two_id,
            created_at: team.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_needs_two_players() {
        let player = Uuid::from_u128(7);
        let req = CreateTeamRequest {
            name: "Solo".to_string(),
            emoji: None,
            player_one_id: player,
            player_two_id: player,
        };
        assert!(req.validate().is_err());

        let req = CreateTeamRequest {
            player_two_id: Uuid::from_u128(8),
            ..req
        };
        assert!(req.validate().is_ok());
    }
}
