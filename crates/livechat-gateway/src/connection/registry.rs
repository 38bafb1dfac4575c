//! Session registry
//!
//! Tracks all active WebSocket connections using DashMap for thread-safe access.

use super::{Connection, Participant};
use crate::protocol::ServerEvent;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Registry of all active WebSocket sessions
pub struct SessionRegistry {
    /// Active connections by session ID
    sessions: DashMap<String, Arc<Connection>>,
}

impl SessionRegistry {
    /// Create a new session registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a new session registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn register(
        &self,
        session_id: String,
        participant: Participant,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Arc<Connection> {
        let connection = Arc::new(Connection::new(session_id.clone(), participant, sender));
        self.sessions.insert(session_id.clone(), connection.clone());

        tracing::debug!(session_id = %session_id, "Session registered");

        connection
    }

    /// Remove a connection
    pub fn remove(&self, session_id: &str) -> Option<Arc<Connection>> {
        let removed = self.sessions.remove(session_id).map(|(_, conn)| conn);

        if removed.is_some() {
            tracing::debug!(session_id = %session_id, "Session removed");
        }

        removed
    }

    /// Get a connection by session ID
    pub fn get(&self, session_id: &str) -> Option<Arc<Connection>> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    /// Check if a session exists
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Get the number of active sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Send an event to every session
    ///
    /// Returns the number of successful deliveries. Full or closed outbound
    /// queues count as failed deliveries and are logged, never propagated.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        let mut failed = 0;

        for entry in self.sessions.iter() {
            if entry.try_send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                failed += 1;
            }
        }

        if failed > 0 {
            tracing::warn!(
                event = event.name(),
                failed = failed,
                "Dropped broadcast deliveries"
            );
        }

        tracing::debug!(
            event = event.name(),
            delivered = delivered,
            "Event broadcast to all sessions"
        );

        delivered
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}
