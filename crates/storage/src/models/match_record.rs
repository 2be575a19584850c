use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One recorded game between two participants of the same kind.
///
/// Player matches and team matches share this shape; which table a record
/// came from is tracked by [`super::ParticipantKind`], not by the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MatchRecord {
    pub match_id: Uuid,
    pub participant_a_id: Uuid,
    pub participant_b_id: Uuid,
    pub score_a: i32,
    pub score_b: i32,
    pub played_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
