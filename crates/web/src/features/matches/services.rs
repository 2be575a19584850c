use sqlx::PgPool;
use storage::{
    dto::matches::{CreateMatchRequest, MatchFilter, MatchResponse, UpdateMatchRequest},
    error::{Result, StorageError},
    models::ParticipantKind,
    repository::{matches::MatchRepository, team::TeamRepository},
    services::roster::load_participants,
};
use uuid::Uuid;

/// List matches of one kind, newest first, with both sides resolved
pub async fn list_matches(
    pool: &PgPool,
    kind: ParticipantKind,
    filter: &MatchFilter,
) -> Result<Vec<MatchResponse>> {
    let month = filter.month_filter()?;

    let records = MatchRepository::new(pool, kind)
        .list_filtered(filter.participant_id, month)
        .await?;
    let roster = load_participants(pool, kind).await?;

    Ok(MatchResponse::resolve_all(records, kind, &roster))
}

/// Get a single match by ID
pub async fn get_match(pool: &PgPool, kind: ParticipantKind, id: Uuid) -> Result<MatchResponse> {
    let record = MatchRepository::new(pool, kind).find_by_id(id).await?;
    resolve_one(pool, kind, record).await
}

/// Record a new match
pub async fn create_match(
    pool: &PgPool,
    kind: ParticipantKind,
    request: &CreateMatchRequest,
) -> Result<MatchResponse> {
    ensure_sides_can_meet(pool, kind, request.participant_a_id, request.participant_b_id).await?;

    let record = MatchRepository::new(pool, kind).create(request).await?;
    tracing::info!(
        match_id = %record.match_id,
        kind = kind.label(),
        score_a = record.score_a,
        score_b = record.score_b,
        "Match recorded"
    );

    resolve_one(pool, kind, record).await
}

/// Correct a recorded match
pub async fn update_match(
    pool: &PgPool,
    kind: ParticipantKind,
    id: Uuid,
    request: &UpdateMatchRequest,
) -> Result<MatchResponse> {
    let repo = MatchRepository::new(pool, kind);

    let existing = repo.find_by_id(id).await?;
    ensure_sides_can_meet(
        pool,
        kind,
        request.participant_a_id.unwrap_or(existing.participant_a_id),
        request.participant_b_id.unwrap_or(existing.participant_b_id),
    )
    .await?;

    let record = repo.update(existing.match_id, &existing, request).await?;

    resolve_one(pool, kind, record).await
}

/// Delete a match
pub async fn delete_match(pool: &PgPool, kind: ParticipantKind, id: Uuid) -> Result<()> {
    MatchRepository::new(pool, kind).delete(id).await?;
    tracing::info!(match_id = %id, kind = kind.label(), "Match deleted");
    Ok(())
}

async fn resolve_one(
    pool: &PgPool,
    kind: ParticipantKind,
    record: storage::models::MatchRecord,
) -> Result<MatchResponse> {
    let roster = load_participants(pool, kind).await?;

    MatchResponse::resolve_all(vec![record], kind, &roster)
        .pop()
        .ok_or(StorageError::NotFound)
}

/// Two teams that share a player cannot play each other. Players need no
/// extra check beyond the foreign keys.
async fn ensure_sides_can_meet(
    pool: &PgPool,
    kind: ParticipantKind,
    participant_a_id: Uuid,
    participant_b_id: Uuid,
) -> Result<()> {
    if kind != ParticipantKind::Team {
        return Ok(());
    }

    let repo = TeamRepository::new(pool);
    let missing_team = |e: StorageError| match e {
        StorageError::NotFound => {
            StorageError::ConstraintViolation("Both sides must be existing teams".to_string())
        }
        other => other,
    };

    let team_a = repo.find_by_id(participant_a_id).await.map_err(missing_team)?;
    let team_b = repo.find_by_id(participant_b_id).await.map_err(missing_team)?;

    if team_a.members().shares_player_with(&team_b.members()) {
        return Err(StorageError::ConstraintViolation(format!(
            "Teams '{}' and '{}' share a player and cannot play each other",
            team_a.name, team_b.name
        )));
    }

    Ok(())
}
