//! SQLite implementation of the `SessionStore` port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AgentName, Session, StateUpdates, Turn};
use crate::domain::ports::SessionStore;

/// `SQLite` implementation of `SessionStore`.
///
/// No cross-process locking: two writers racing on one session id is a
/// documented limitation of the assumed usage model (one active
/// conversation per session id at a time).
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create_session(&self) -> DomainResult<Session> {
        // Short opaque id, unique within one store instance.
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(12);
        let session = Session::new(id);

        sqlx::query(
            "INSERT INTO sessions (id, problem_state, decision_state, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(session.problem_state.as_str())
        .bind(session.decision_state.as_str())
        .bind(session.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> DomainResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, problem_state, decision_state, created_at
             FROM sessions WHERE id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| session_from_row(&r)).transpose()
    }

    async fn update_state(&self, session_id: &str, patch: StateUpdates) -> DomainResult<()> {
        if let Some(problem_state) = patch.problem_state {
            sqlx::query("UPDATE sessions SET problem_state = ? WHERE id = ?")
                .bind(problem_state.as_str())
                .bind(session_id)
                .execute(&self.pool)
                .await?;
        }
        if let Some(decision_state) = patch.decision_state {
            sqlx::query("UPDATE sessions SET decision_state = ? WHERE id = ?")
                .bind(decision_state.as_str())
                .bind(session_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    async fn add_turn(
        &self,
        session_id: &str,
        query: &str,
        intent: &str,
        sequence: &[AgentName],
    ) -> DomainResult<i64> {
        let row = sqlx::query(
            "SELECT COALESCE(MAX(turn_number), 0) AS max_turn FROM turns WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_one(&self.pool)
        .await?;
        let turn_number: i64 = row.try_get::<i64, _>("max_turn")? + 1;

        let sequence_json = serde_json::to_string(sequence)?;
        sqlx::query(
            "INSERT INTO turns (session_id, turn_number, query, intent, sequence, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(turn_number)
        .bind(query)
        .bind(intent)
        .bind(&sequence_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(turn_number)
    }

    async fn recent_turns(&self, session_id: &str, limit: u32) -> DomainResult<Vec<Turn>> {
        let rows = sqlx::query(
            "SELECT session_id, turn_number, query, intent, sequence, created_at
             FROM turns WHERE session_id = ?
             ORDER BY turn_number DESC LIMIT ?",
        )
        .bind(session_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut turns = rows
            .iter()
            .map(turn_from_row)
            .collect::<DomainResult<Vec<_>>>()?;
        // Fetched descending, returned oldest first.
        turns.reverse();
        Ok(turns)
    }
}

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> DomainResult<Session> {
    let problem_state: String = row.try_get("problem_state")?;
    let decision_state: String = row.try_get("decision_state")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Session {
        id: row.try_get("id")?,
        problem_state: problem_state
            .parse()
            .map_err(DomainError::SerializationError)?,
        decision_state: decision_state
            .parse()
            .map_err(DomainError::SerializationError)?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn turn_from_row(row: &sqlx::sqlite::SqliteRow) -> DomainResult<Turn> {
    let sequence_json: String = row.try_get("sequence")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Turn {
        session_id: row.try_get("session_id")?,
        turn_number: row.try_get("turn_number")?,
        query: row.try_get("query")?,
        intent: row.try_get("intent")?,
        sequence: serde_json::from_str(&sequence_json)?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn parse_datetime(value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::SerializationError(format!("invalid timestamp: {e}")))
}
