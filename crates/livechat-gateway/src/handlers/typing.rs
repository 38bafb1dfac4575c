//! Typing indicator handlers (chat:typing, chat:stop-typing)

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{RoomPayload, ServerEvent};
use crate::rooms::chat_room;
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles typing indicator events
pub struct TypingHandler;

impl TypingHandler {
    /// Handle a chat:typing event
    ///
    /// Records the typer in the presence store (last writer wins, short TTL)
    /// and tells everyone else in the room. A store failure is logged and the
    /// broadcast still goes out.
    pub async fn start(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<()> {
        let participant = connection.participant();
        let (Some(user_id), Some(user_type)) =
            (participant.participant_id(), participant.sender_kind())
        else {
            return Ok(());
        };

        if let Err(e) = state
            .services()
            .presence_store()
            .set_typing(payload.chat_id, &user_id)
            .await
        {
            tracing::warn!(
                chat_id = %payload.chat_id,
                error = %e,
                "Failed to record typing state"
            );
        }

        state.router().send_to_room_except(
            &chat_room(payload.chat_id),
            connection.session_id(),
            &ServerEvent::Typing {
                chat_id: payload.chat_id,
                user_id,
                user_type,
            },
        );

        Ok(())
    }

    /// Handle a chat:stop-typing event
    ///
    /// Tells everyone else in the room; the presence entry is left to expire
    /// on its own TTL.
    pub fn stop(state: &GatewayState, connection: &Arc<Connection>, payload: RoomPayload) {
        let Some(user_id) = connection.participant().participant_id() else {
            return;
        };

        state.router().send_to_room_except(
            &chat_room(payload.chat_id),
            connection.session_id(),
            &ServerEvent::StopTyping {
                chat_id: payload.chat_id,
                user_id,
            },
        );
    }
}
