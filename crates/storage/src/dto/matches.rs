use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{MatchRecord, Participant, ParticipantKind};
use crate::services::months::MonthFilter;
use crate::services::standings::StandingsError;

/// Query parameters for listing matches
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchFilter {
    /// Only matches this player or team took part in
    pub participant_id: Option<Uuid>,
    /// `all` or a `YYYY-MM` month key
    pub month: Option<String>,
}

impl MatchFilter {
    pub fn month_filter(&self) -> Result<MonthFilter, StandingsError> {
        MonthFilter::parse_optional(self.month.as_deref())
    }
}

/// Request payload for recording a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_distinct_sides"))]
pub struct CreateMatchRequest {
    pub participant_a_id: Uuid,

    pub participant_b_id: Uuid,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score_a: i32,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score_b: i32,

    /// Defaults to the time the request is processed
    pub played_at: Option<DateTime<Utc>>,
}

/// Request payload for correcting a recorded match
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMatchRequest {
    pub participant_a_id: Option<Uuid>,

    pub participant_b_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score_a: Option<i32>,

    #[validate(range(min = 0, message = "Score cannot be negative"))]
    pub score_b: Option<i32>,

    pub played_at: Option<DateTime<Utc>>,
}

fn validate_distinct_sides(req: &CreateMatchRequest) -> Result<(), validator::ValidationError> {
    if req.participant_a_id == req.participant_b_id {
        let mut error = validator::ValidationError::new("same_participant");
        error.message = Some("A match needs two different participants".into());
        return Err(error);
    }
    Ok(())
}

/// Display fields of one side of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParticipantSummary {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub emoji: Option<String>,
}

impl ParticipantSummary {
    fn unknown(id: Uuid) -> Self {
        Self {
            id,
            name: "Unknown".to_string(),
            nickname: None,
            emoji: None,
        }
    }
}

impl From<&Participant> for ParticipantSummary {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name.clone(),
            nickname: participant.nickname.clone(),
            emoji: participant.emoji.clone(),
        }
    }
}

/// A match with both sides resolved to display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub match_id: Uuid,
    pub kind: ParticipantKind,
    pub participant_a: ParticipantSummary,
    pub participant_b: ParticipantSummary,
    pub score_a: i32,
    pub score_b: i32,
    pub played_at: DateTime<Utc>,
}

impl MatchResponse {
    pub fn resolve(
        record: MatchRecord,
        kind: ParticipantKind,
        roster: &HashMap<Uuid, &Participant>,
    ) -> Self {
        let summary = |id: Uuid| {
            roster
                .get(&id)
                .map(|p| ParticipantSummary::from(*p))
                .unwrap_or_else(|| ParticipantSummary::unknown(id))
        };

        Self {
            match_id: record.match_id,
            kind,
            participant_a: summary(record.participant_a_id),
            participant_b: summary(record.participant_b_id),
            score_a: record.score_a,
            score_b: record.score_b,
            played_at: record.played_at,
        }
    }

    /// Resolves a batch of matches against a roster snapshot.
    pub fn resolve_all(
        records: Vec<MatchRecord>,
        kind: ParticipantKind,
        participants: &[Participant],
    ) -> Vec<Self> {
        let roster: HashMap<Uuid, &Participant> = participants.iter().map(|p| (p.id, p)).collect();

        records
            .into_iter()
            .map(|record| Self::resolve(record, kind, &roster))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_match_validation() {
        let req = CreateMatchRequest {
            participant_a_id: Uuid::from_u128(1),
            participant_b_id: Uuid::from_u128(2),
            score_a: 10,
            score_b: 0,
            played_at: None,
        };
        assert!(req.validate().is_ok());

        let negative = CreateMatchRequest {
            score_b: -2,
            ..req.clone()
        };
        assert!(negative.validate().is_err());

        let same_side = CreateMatchRequest {
            participant_b_id: Uuid::from_u128(1),
            ..req
        };
        assert!(same_side.validate().is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_unknown() {
        let now = Utc::now();
        let alice = Participant {
            id: Uuid::from_u128(1),
            name: "Alice".to_string(),
            nickname: Some("Ace".to_string()),
            emoji: None,
            members: None,
        };
        let record = MatchRecord {
            match_id: Uuid::from_u128(100),
            participant_a_id: alice.id,
            participant_b_id: Uuid::from_u128(2),
            score_a: 10,
            score_b: 4,
            played_at: now,
            created_at: now,
        };

        let resolved = MatchResponse::resolve_all(vec![record], ParticipantKind::Player, &[alice]);

        assert_eq!(resolved[0].participant_a.nickname.as_deref(), Some("Ace"));
        assert_eq!(resolved[0].participant_b.name, "Unknown");
    }

    #[test]
    fn test_match_filter_rejects_bad_month() {
        let filter = MatchFilter {
            participant_id: None,
            month: Some("2024/01".to_string()),
        };
        assert!(filter.month_filter().is_err());
    }
}
