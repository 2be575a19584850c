use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::standings::{MonthOption, Standings, StandingsFilter, StandingsOverview},
    models::ParticipantKind,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/standings/players",
    params(StandingsFilter),
    responses(
        (status = 200, description = "Player standings, ranked by points then wins", body = Standings),
        (status = 400, description = "Invalid month filter or malformed match data")
    ),
    tag = "standings"
)]
pub async fn get_player_standings(
    State(db): State<Database>,
    Query(filter): Query<StandingsFilter>,
) -> Result<Response, WebError> {
    let month = filter.month_filter()?;

    let standings = services::get_standings(db.pool(), ParticipantKind::Player, month).await?;

    Ok(Json(standings).into_response())
}

#[utoipa::path(
    get,
    path = "/api/standings/players/months",
    responses(
        (status = 200, description = "Months with player matches, most recent first after 'all'", body = Vec<MonthOption>)
    ),
    tag = "standings"
)]
pub async fn get_player_months(State(db): State<Database>) -> Result<Response, WebError> {
    let options = services::get_month_options(db.pool(), ParticipantKind::Player).await?;

    Ok(Json(options).into_response())
}

#[utoipa::path(
    get,
    path = "/api/standings/players/overview",
    params(StandingsFilter),
    responses(
        (status = 200, description = "Everything the player standings page needs", body = StandingsOverview),
        (status = 400, description = "Invalid month filter or malformed match data")
    ),
    tag = "standings"
)]
pub async fn get_player_overview(
    State(db): State<Database>,
    Query(filter): Query<StandingsFilter>,
) -> Result<Response, WebError> {
    let month = filter.month_filter()?;

    let overview = services::get_overview(db.pool(), ParticipantKind::Player, month).await?;

    Ok(Json(overview).into_response())
}

#[utoipa::path(
    get,
    path = "/api/standings/teams",
    params(StandingsFilter),
    responses(
        (status = 200, description = "Team standings, ranked by points then wins", body = Standings),
        (status = 400, description = "Invalid month filter or malformed match data")
    ),
    tag = "standings"
)]
pub async fn get_team_standings(
    State(db): State<Database>,
    Query(filter): Query<StandingsFilter>,
) -> Result<Response, WebError> {
    let month = filter.month_filter()?;

    let standings = services::get_standings(db.pool(), ParticipantKind::Team, month).await?;

    Ok(Json(standings).into_response())
}

#[utoipa::path(
    get,
    path = "/api/standings/teams/months",
    responses(
        (status = 200, description = "Months with team matches, most recent first after 'all'", body = Vec<MonthOption>)
    ),
    tag = "standings"
)]
pub async fn get_team_months(State(db): State<Database>) -> Result<Response, WebError> {
    let options = services::get_month_options(db.pool(), ParticipantKind::Team).await?;

    Ok(Json(options).into_response())
}

#[utoipa::path(
    get,
    path = "/api/standings/teams/overview",
    params(StandingsFilter),
    responses(
        (status = 200, description = "Everything the team standings page needs", body = StandingsOverview),
        (status = 400, description = "Invalid month filter or malformed match data")
    ),
    tag = "standings"
)]
pub async fn get_team_overview(
    State(db): State<Database>,
    Query(filter): Query<StandingsFilter>,
) -> Result<Response, WebError> {
    let month = filter.month_filter()?;

    let overview = services::get_overview(db.pool(), ParticipantKind::Team, month).await?;

    Ok(Json(overview).into_response())
}
