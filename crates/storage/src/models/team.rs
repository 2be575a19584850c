use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::TeamMembers;

/// A two-player team. Members are stored normalized, see [`TeamMembers`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Team {
    pub team_id: Uuid,
    pub name: String,
    pub emoji: Option<String>,
    pub player_one_id: Uuid,
    pub player_two_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn members(&self) -> TeamMembers {
        TeamMembers::new(self.player_one_id, self.player_two_id)
    }
}
