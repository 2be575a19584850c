use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Participant, ParticipantKind};
use crate::repository::{player::PlayerRepository, team::TeamRepository};

/// Every player or team, in listing order, as kind-agnostic participants.
pub async fn load_participants(pool: &PgPool, kind: ParticipantKind) -> Result<Vec<Participant>> {
    let participants: Vec<Participant> = match kind {
        ParticipantKind::Player => PlayerRepository::new(pool)
            .list()
            .await?
            .iter()
            .map(Participant::from)
            .collect(),
        ParticipantKind::Team => TeamRepository::new(pool)
            .list()
            .await?
            .iter()
            .map(Participant::from)
            .collect(),
    };

    Ok(participants)
}
