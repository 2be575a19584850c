use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::player::{CreatePlayerRequest, UpdatePlayerRequest};
use crate::error::{Result, StorageError};
use crate::models::{ParticipantKind, Player};
use crate::repository::matches::MatchRepository;

const PLAYER_COLUMNS: &str = "player_id, name, nickname, emoji, created_at";

// A delete can race with a new match, so the foreign key may belong to
// either `teams` or `matches`.
const PLAYER_IN_USE: &str = "Player is still referenced by a team or a match and cannot be deleted";

pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all players, alphabetically
    pub async fn list(&self) -> Result<Vec<Player>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY name, created_at");

        let players = sqlx::query_as::<_, Player>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(players)
    }

    /// Find player by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Player> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = $1");

        sqlx::query_as::<_, Player>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Create a new player
    pub async fn create(&self, req: &CreatePlayerRequest) -> Result<Player> {
        let sql = format!(
            "INSERT INTO players (name, nickname, emoji) VALUES ($1, $2, $3) RETURNING {PLAYER_COLUMNS}"
        );

        let player = sqlx::query_as::<_, Player>(&sql)
            .bind(&req.name)
            .bind(&req.nickname)
            .bind(&req.emoji)
            .fetch_one(self.pool)
            .await?;

        Ok(player)
    }

    /// Update an existing player, keeping fields the request leaves out
    pub async fn update(
        &self,
        id: Uuid,
        existing: &Player,
        req: &UpdatePlayerRequest,
    ) -> Result<Player> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let nickname = req.nickname.as_ref().or(existing.nickname.as_ref());
        let emoji = req.emoji.as_ref().or(existing.emoji.as_ref());

        let sql = format!(
            r#"
            UPDATE players
            SET name = $2,
                nickname = $3,
                emoji = $4
            WHERE player_id = $1
            RETURNING {PLAYER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Player>(&sql)
            .bind(id)
            .bind(name)
            .bind(nickname)
            .bind(emoji)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a player. Refused while the player has matches or belongs to a team.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let match_count = MatchRepository::new(self.pool, ParticipantKind::Player)
            .count_for_participant(id)
            .await?;

        if match_count > 0 {
            return Err(StorageError::ConstraintViolation(format!(
                "Player has {match_count} recorded matches and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM players WHERE player_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).or_constraint(
                    "Player cannot be deleted",
                    PLAYER_IN_USE,
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
