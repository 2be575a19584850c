use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Player, Team, TeamMembers};

/// Which side of the league a participant or match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Player,
    Team,
}

impl ParticipantKind {
    pub fn matches_table(&self) -> &'static str {
        match self {
            Self::Player => "matches",
            Self::Team => "team_matches",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Team => "Team",
        }
    }
}

/// Kind-agnostic view of a player or team, as consumed by the standings engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub emoji: Option<String>,
    /// Only set for teams
    pub members: Option<TeamMembers>,
}

impl From<&Player> for Participant {
    fn from(player: &Player) -> Self {
        Self {
            id: player.player_id,
            name: player.name.clone(),
            nickname: player.nickname.clone(),
            emoji: player.emoji.clone(),
            members: None,
        }
    }
}

impl From<&Team> for Participant {
    fn from(team: &Team) -> Self {
        Self {
            id: team.team_id,
            name: team.name.clone(),
            nickname: None,
            emoji: team.emoji.clone(),
            members: Some(team.members()),
        }
    }
}
