//! Room router
//!
//! Delivers server events to room members over their per-connection queues.

use super::RoomRegistry;
use crate::connection::SessionRegistry;
use crate::protocol::ServerEvent;
use std::sync::Arc;

/// Routes events to room members and to all sessions
///
/// Delivery is non-blocking: a full or closed per-connection queue counts
/// as a failed delivery and is logged, never propagated.
pub struct RoomRouter {
    sessions: Arc<SessionRegistry>,
    rooms: Arc<RoomRegistry>,
}

impl RoomRouter {
    /// Create a new room router
    #[must_use]
    pub fn new(sessions: Arc<SessionRegistry>, rooms: Arc<RoomRegistry>) -> Self {
        Self { sessions, rooms }
    }

    /// Send an event to every member of a room, sender included
    ///
    /// Returns the number of successful deliveries.
    pub fn send_to_room(&self, room: &str, event: &ServerEvent) -> usize {
        self.deliver(room, None, event)
    }

    /// Send an event to every member of a room except one session
    pub fn send_to_room_except(
        &self,
        room: &str,
        exclude_session: &str,
        event: &ServerEvent,
    ) -> usize {
        self.deliver(room, Some(exclude_session), event)
    }

    /// Send an event to every active session
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        self.sessions.broadcast(event)
    }

    fn deliver(&self, room: &str, exclude: Option<&str>, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        let mut failed = 0;

        for session_id in self.rooms.members(room) {
            if exclude == Some(session_id.as_str()) {
                continue;
            }

            // A member without a live session is a stale room entry
            match self.sessions.get(&session_id) {
                Some(conn) => {
                    if conn.try_send(event.clone()).is_ok() {
                        delivered += 1;
                    } else {
                        failed += 1;
                    }
                }
                None => failed += 1,
            }
        }

        if failed > 0 {
            tracing::warn!(
                room = %room,
                event = event.name(),
                failed = failed,
                "Dropped room deliveries"
            );
        }

        tracing::trace!(
            room = %room,
            event = event.name(),
            delivered = delivered,
            "Event sent to room"
        );

        delivered
    }
}

impl std::fmt::Debug for RoomRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRouter")
            .field("sessions", &self.sessions)
            .field("rooms", &self.rooms)
            .finish()
    }
}
