use sqlx::PgPool;
use storage::{
    dto::{
        matches::MatchResponse,
        standings::{MonthOption, Standings, StandingsOverview},
    },
    error::Result,
    models::ParticipantKind,
    repository::matches::MatchRepository,
    services::{
        months::{MonthFilter, compute_month_options},
        roster::load_participants,
        standings::compute_standings,
    },
};

/// Ranked standings for one participant kind
pub async fn get_standings(
    pool: &PgPool,
    kind: ParticipantKind,
    filter: MonthFilter,
) -> Result<Standings> {
    let participants = load_participants(pool, kind).await?;
    let matches = MatchRepository::new(pool, kind).list().await?;

    Ok(compute_standings(&participants, &matches, filter)?)
}

/// Month selector options for one participant kind
pub async fn get_month_options(pool: &PgPool, kind: ParticipantKind) -> Result<Vec<MonthOption>> {
    let matches = MatchRepository::new(pool, kind).list().await?;

    Ok(compute_month_options(&matches))
}

/// Roster, matches, standings and month options from one snapshot
pub async fn get_overview(
    pool: &PgPool,
    kind: ParticipantKind,
    filter: MonthFilter,
) -> Result<StandingsOverview> {
    let participants = load_participants(pool, kind).await?;
    let matches = MatchRepository::new(pool, kind).list().await?;

    let standings = compute_standings(&participants, &matches, filter)?;
    let month_options = compute_month_options(&matches);

    let filtered: Vec<_> = matches
        .into_iter()
        .filter(|record| filter.matches(&record.played_at))
        .collect();

    tracing::debug!(
        kind = kind.label(),
        month = %filter.key(),
        participants = participants.len(),
        matches = filtered.len(),
        "Built standings overview"
    );

    Ok(StandingsOverview {
        kind,
        selected_month: filter.key(),
        matches: MatchResponse::resolve_all(filtered, kind, &participants),
        participants,
        standings,
        month_options,
    })
}
