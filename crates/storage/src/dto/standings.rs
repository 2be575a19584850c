use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{Participant, ParticipantKind};
use crate::services::months::{ALL_MONTHS_KEY, ALL_MONTHS_LABEL, MonthFilter};
use crate::services::standings::StandingsError;

use super::matches::MatchResponse;

/// Query parameters accepted by every standings endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StandingsFilter {
    /// `all` or a `YYYY-MM` month key. Omitted means `all`.
    pub month: Option<String>,
}

impl StandingsFilter {
    pub fn month_filter(&self) -> Result<MonthFilter, StandingsError> {
        MonthFilter::parse_optional(self.month.as_deref())
    }
}

/// One entry of the month selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl MonthOption {
    pub fn all() -> Self {
        Self {
            value: ALL_MONTHS_KEY.to_string(),
            label: ALL_MONTHS_LABEL.to_string(),
            year: None,
            month: None,
        }
    }
}

/// Per-participant totals. Display fields are copied from the participant
/// so callers can render the table without a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StandingsRow {
    pub participant_id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub emoji: Option<String>,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
}

impl StandingsRow {
    pub fn seed(participant: &Participant) -> Self {
        Self {
            participant_id: participant.id,
            name: participant.name.clone(),
            nickname: participant.nickname.clone(),
            emoji: participant.emoji.clone(),
            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            points: 0,
        }
    }
}

/// Ranked table plus the matches that could not be attributed to the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Standings {
    pub rows: Vec<StandingsRow>,
    /// Ids of matches referencing a participant missing from the roster
    pub skipped_matches: Vec<Uuid>,
}

/// Everything the standings page needs in a single round trip
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsOverview {
    pub kind: ParticipantKind,
    pub selected_month: String,
    pub participants: Vec<Participant>,
    pub matches: Vec<MatchResponse>,
    pub standings: Standings,
    pub month_options: Vec<MonthOption>,
}
