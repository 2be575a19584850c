use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::matches::{CreateMatchRequest, UpdateMatchRequest};
use crate::error::{Result, StorageError};
use crate::models::{MatchRecord, ParticipantKind};
use crate::services::months::MonthFilter;

const MATCH_COLUMNS: &str =
    "match_id, participant_a_id, participant_b_id, score_a, score_b, played_at, created_at";

/// Matches of one participant kind. Player matches and team matches live in
/// separate tables with identical columns.
pub struct MatchRepository<'a> {
    pool: &'a PgPool,
    kind: ParticipantKind,
}

impl<'a> MatchRepository<'a> {
    pub fn new(pool: &'a PgPool, kind: ParticipantKind) -> Self {
        Self { pool, kind }
    }

    /// The full match log, most recent first
    pub async fn list(&self) -> Result<Vec<MatchRecord>> {
        self.list_filtered(None, MonthFilter::All).await
    }

    /// Matches optionally restricted to one participant and/or one UTC month
    pub async fn list_filtered(
        &self,
        participant_id: Option<Uuid>,
        month: MonthFilter,
    ) -> Result<Vec<MatchRecord>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {MATCH_COLUMNS} FROM {} WHERE 1=1",
            self.kind.matches_table()
        ));

        if let Some(id) = participant_id {
            query.push(" AND (participant_a_id = ");
            query.push_bind(id);
            query.push(" OR participant_b_id = ");
            query.push_bind(id);
            query.push(")");
        }

        if let MonthFilter::Month(key) = month {
            let (start, end) = key.bounds();
            query.push(" AND played_at >= ");
            query.push_bind(start);
            query.push(" AND played_at < ");
            query.push_bind(end);
        }

        query.push(" ORDER BY played_at DESC, created_at DESC");

        let matches = query
            .build_query_as::<MatchRecord>()
            .fetch_all(self.pool)
            .await?;

        Ok(matches)
    }

    /// Find match by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<MatchRecord> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM {} WHERE match_id = $1",
            self.kind.matches_table()
        );

        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Number of matches a participant appears in, on either side
    pub async fn count_for_participant(&self, participant_id: Uuid) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE participant_a_id = $1 OR participant_b_id = $1",
            self.kind.matches_table()
        );

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(participant_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Record a new match
    pub async fn create(&self, req: &CreateMatchRequest) -> Result<MatchRecord> {
        let played_at = req.played_at.unwrap_or_else(Utc::now);

        let sql = format!(
            r#"
            INSERT INTO {} (participant_a_id, participant_b_id, score_a, score_b, played_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MATCH_COLUMNS}
            "#,
            self.kind.matches_table()
        );

        let record = sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(req.participant_a_id)
            .bind(req.participant_b_id)
            .bind(req.score_a)
            .bind(req.score_b)
            .bind(played_at)
            .fetch_one(self.pool)
            .await
            .map_err(|e| self.constraint_error(e))?;

        Ok(record)
    }

    /// Update an existing match, keeping fields the request leaves out
    pub async fn update(
        &self,
        id: Uuid,
        existing: &MatchRecord,
        req: &UpdateMatchRequest,
    ) -> Result<MatchRecord> {
        let participant_a_id = req.participant_a_id.unwrap_or(existing.participant_a_id);
        let participant_b_id = req.participant_b_id.unwrap_or(existing.participant_b_id);

        if participant_a_id == participant_b_id {
            return Err(StorageError::ConstraintViolation(
                "A match needs two different participants".to_string(),
            ));
        }

        let sql = format!(
            r#"
            UPDATE {}
            SET participant_a_id = $2,
                participant_b_id = $3,
                score_a = $4,
                score_b = $5,
                played_at = $6
            WHERE match_id = $1
            RETURNING {MATCH_COLUMNS}
            "#,
            self.kind.matches_table()
        );

        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(id)
            .bind(participant_a_id)
            .bind(participant_b_id)
            .bind(req.score_a.unwrap_or(existing.score_a))
            .bind(req.score_b.unwrap_or(existing.score_b))
            .bind(req.played_at.unwrap_or(existing.played_at))
            .fetch_optional(self.pool)
            .await
            .map_err(|e| self.constraint_error(e))?
            .ok_or(StorageError::NotFound)
    }

    /// Delete a match by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE match_id = $1", self.kind.matches_table());

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    fn constraint_error(&self, error: sqlx::Error) -> StorageError {
        let unknown_side = format!(
            "Both sides must be existing {}s",
            self.kind.label().to_lowercase()
        );
        StorageError::from(error).or_constraint("Duplicate match", &unknown_side)
    }
}
