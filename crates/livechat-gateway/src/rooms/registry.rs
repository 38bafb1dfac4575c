//! Room registry
//!
//! Tracks which sessions are in which rooms. Rooms are plain string names;
//! one per chat conversation plus a shared room for all admins.

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Shared room every connected admin is joined to
pub const ADMINS_ROOM: &str = "admins";

/// Room name for a chat conversation
#[must_use]
pub fn chat_room(chat_id: Uuid) -> String {
    format!("chat:{chat_id}")
}

/// Tracks room membership by session ID
pub struct RoomRegistry {
    /// Room name to session IDs
    rooms: DashMap<String, HashSet<String>>,
}

impl RoomRegistry {
    /// Create a new room registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Create a new room registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Add a session to a room (idempotent)
    pub fn join(&self, room: &str, session_id: &str) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(session_id.to_string());

        tracing::trace!(room = %room, session_id = %session_id, "Session joined room");
    }

    /// Remove a session from a room
    ///
    /// Uses `alter` plus `retain` for atomic modify-and-cleanup so empty
    /// rooms never linger.
    pub fn leave(&self, room: &str, session_id: &str) {
        self.rooms.alter(room, |_, mut members| {
            members.remove(session_id);
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());

        tracing::trace!(room = %room, session_id = %session_id, "Session left room");
    }

    /// Remove a session from every room it is in
    pub fn leave_all(&self, session_id: &str) {
        self.rooms.alter_all(|_, mut members| {
            members.remove(session_id);
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());

        tracing::trace!(session_id = %session_id, "Session left all rooms");
    }

    /// Get the session IDs in a room
    pub fn members(&self, room: &str) -> Vec<String> {
        self.rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get the number of sessions in a room
    pub fn member_count(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, |members| members.len())
    }

    /// Get the number of non-empty rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
