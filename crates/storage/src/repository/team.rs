use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::team::{CreateTeamRequest, UpdateTeamRequest};
use crate::error::{Result, StorageError};
use crate::models::{ParticipantKind, Team, TeamMembers};
use crate::repository::matches::MatchRepository;

const TEAM_COLUMNS: &str = "team_id, name, emoji, player_one_id, player_two_id, created_at";

const DUPLICATE_TEAM: &str = "A team with these two players already exists";
const UNKNOWN_MEMBER: &str = "Both team members must be existing players";

pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all teams, alphabetically
    pub async fn list(&self) -> Result<Vec<Team>> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY name, created_at");

        let teams = sqlx::query_as::<_, Team>(&sql).fetch_all(self.pool).await?;

        Ok(teams)
    }

    /// Find team by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Team> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1");

        sqlx::query_as::<_, Team>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Create a new team. The member pair is normalized before insert.
    pub async fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        let members = checked_members(req.player_one_id, req.player_two_id)?;
        let (player_one_id, player_two_id) = members.as_database_tuple();

        let sql = format!(
            r#"
            INSERT INTO teams (name, emoji, player_one_id, player_two_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {TEAM_COLUMNS}
            "#
        );

        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(&req.name)
            .bind(&req.emoji)
            .bind(player_one_id)
            .bind(player_two_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).or_constraint(DUPLICATE_TEAM, UNKNOWN_MEMBER))?;

        Ok(team)
    }

    /// Update an existing team, keeping fields the request leaves out.
    /// The lineup is frozen once the team has recorded matches.
    pub async fn update(&self, id: Uuid, existing: &Team, req: &UpdateTeamRequest) -> Result<Team> {
        let name = req.name.as_ref().unwrap_or(&existing.name);
        let emoji = req.emoji.as_ref().or(existing.emoji.as_ref());
        let members = requested_members(existing, req)?;

        if members != existing.members() {
            let match_count = MatchRepository::new(self.pool, ParticipantKind::Team)
                .count_for_participant(id)
                .await?;

            if match_count > 0 {
                return Err(StorageError::ConstraintViolation(format!(
                    "Team has {match_count} recorded matches and its players cannot be changed"
                )));
            }
        }

        let (player_one_id, player_two_id) = members.as_database_tuple();

        let sql = format!(
            r#"
            UPDATE teams
            SET name = $2,
                emoji = $3,
                player_one_id = $4,
                player_two_id = $5
            WHERE team_id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Team>(&sql)
            .bind(id)
            .bind(name)
            .bind(emoji)
            .bind(player_one_id)
            .bind(player_two_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).or_constraint(DUPLICATE_TEAM, UNKNOWN_MEMBER))?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a team. Refused while the team has matches.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let match_count = MatchRepository::new(self.pool, ParticipantKind::Team)
            .count_for_participant(id)
            .await?;

        if match_count > 0 {
            return Err(StorageError::ConstraintViolation(format!(
                "Team has {match_count} recorded matches and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).or_constraint(
                    "Team cannot be deleted",
                    "Team still has recorded matches and cannot be deleted",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// The lineup an update would leave the team with.
fn requested_members(existing: &Team, req: &UpdateTeamRequest) -> Result<TeamMembers> {
    checked_members(
        req.player_one_id.unwrap_or(existing.player_one_id),
        req.player_two_id.unwrap_or(existing.player_two_id),
    )
}

fn checked_members(first: Uuid, second: Uuid) -> Result<TeamMembers> {
    let members = TeamMembers::new(first, second);

    if !members.is_pair() {
        return Err(StorageError::ConstraintViolation(
            "A team needs two different players".to_string(),
        ));
    }

    Ok(members)
}
