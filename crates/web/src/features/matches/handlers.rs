use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::matches::{CreateMatchRequest, MatchFilter, MatchResponse, UpdateMatchRequest},
    models::ParticipantKind,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/matches",
    params(MatchFilter),
    responses(
        (status = 200, description = "Player matches, most recent first", body = Vec<MatchResponse>),
        (status = 400, description = "Invalid month filter")
    ),
    tag = "matches"
)]
pub async fn list_player_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    let matches = services::list_matches(db.pool(), ParticipantKind::Player, &filter).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_player_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let record = services::get_match(db.pool(), ParticipantKind::Player, id).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    post,
    path = "/api/matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match recorded successfully", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Unknown player")
    ),
    tag = "matches"
)]
pub async fn create_player_match(
    State(db): State<Database>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let record = services::create_match(db.pool(), ParticipantKind::Player, &req).await?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match updated successfully", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Unknown player")
    ),
    tag = "matches"
)]
pub async fn update_player_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let record =
        services::update_match(db.pool(), ParticipantKind::Player, id, &update_req).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_player_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_match(db.pool(), ParticipantKind::Player, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/team-matches",
    params(MatchFilter),
    responses(
        (status = 200, description = "Team matches, most recent first", body = Vec<MatchResponse>),
        (status = 400, description = "Invalid month filter")
    ),
    tag = "matches"
)]
pub async fn list_team_matches(
    State(db): State<Database>,
    Query(filter): Query<MatchFilter>,
) -> Result<Response, WebError> {
    let matches = services::list_matches(db.pool(), ParticipantKind::Team, &filter).await?;

    Ok(Json(matches).into_response())
}

#[utoipa::path(
    get,
    path = "/api/team-matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    responses(
        (status = 200, description = "Match found", body = MatchResponse),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn get_team_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let record = services::get_match(db.pool(), ParticipantKind::Team, id).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    post,
    path = "/api/team-matches",
    request_body = CreateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match recorded successfully", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Unknown team or the teams share a player")
    ),
    tag = "matches"
)]
pub async fn create_team_match(
    State(db): State<Database>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let record = services::create_match(db.pool(), ParticipantKind::Team, &req).await?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/team-matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    request_body = UpdateMatchRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match updated successfully", body = MatchResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found"),
        (status = 409, description = "Unknown team or the teams share a player")
    ),
    tag = "matches"
)]
pub async fn update_team_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateMatchRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let record =
        services::update_match(db.pool(), ParticipantKind::Team, id, &update_req).await?;

    Ok(Json(record).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/team-matches/{id}",
    params(
        ("id" = Uuid, Path, description = "Match ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Match deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Match not found")
    ),
    tag = "matches"
)]
pub async fn delete_team_match(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_match(db.pool(), ParticipantKind::Team, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
