use sqlx::PgPool;
use storage::{
    dto::player::{CreatePlayerRequest, UpdatePlayerRequest},
    error::Result,
    models::Player,
    repository::player::PlayerRepository,
};
use uuid::Uuid;

/// List all players
pub async fn list_players(pool: &PgPool) -> Result<Vec<Player>> {
    let repo = PlayerRepository::new(pool);
    repo.list().await
}

/// Get player by ID
pub async fn get_player(pool: &PgPool, id: Uuid) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new player
pub async fn create_player(pool: &PgPool, request: &CreatePlayerRequest) -> Result<Player> {
    let repo = PlayerRepository::new(pool);
    let player = repo.create(request).await?;
    tracing::info!(player_id = %player.player_id, name = %player.name, "Player created");
    Ok(player)
}

/// Update a player
pub async fn update_player(
    pool: &PgPool,
    id: Uuid,
    request: &UpdatePlayerRequest,
) -> Result<Player> {
    let repo = PlayerRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(existing.player_id, &existing, request).await
}

/// Delete a player that has no matches and no team
pub async fn delete_player(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = PlayerRepository::new(pool);
    repo.delete(id).await?;
    tracing::info!(player_id = %id, "Player deleted");
    Ok(())
}
