/// Session store port (trait) for dependency injection.
///
/// Defines the contract for session and turn-log persistence. Services
/// depend on this trait, not concrete implementations.
use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentName, Session, StateUpdates, Turn};

/// Repository trait for session state and the append-only turn log.
///
/// Operations are independently idempotent for retries. No cross-process
/// locking is assumed: concurrent writers to one session id are a
/// documented limitation, not a solved case.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a new session with an opaque generated id and default state.
    async fn create_session(&self) -> DomainResult<Session>;

    /// Retrieves a session by id.
    ///
    /// # Returns
    /// - `Some(Session)` if found
    /// - `None` if not found
    async fn get_session(&self, session_id: &str) -> DomainResult<Option<Session>>;

    /// Applies a partial patch to either or both state enums.
    /// Unset fields are left unchanged.
    async fn update_state(&self, session_id: &str, patch: StateUpdates) -> DomainResult<()>;

    /// Records a turn and returns its number.
    ///
    /// Turn numbers are monotonic per session, starting at 1.
    async fn add_turn(
        &self,
        session_id: &str,
        query: &str,
        intent: &str,
        sequence: &[AgentName],
    ) -> DomainResult<i64>;

    /// Returns the last `limit` turns for a session, oldest first.
    async fn recent_turns(&self, session_id: &str, limit: u32) -> DomainResult<Vec<Turn>>;
}
