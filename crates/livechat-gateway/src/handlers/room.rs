//! Room membership handlers (chat:join, chat:leave)

use super::HandlerResult;
use crate::connection::{Connection, Participant};
use crate::protocol::{RoomPayload, ServerEvent};
use crate::rooms::chat_room;
use crate::server::GatewayState;
use livechat_service::MessageService;
use std::sync::Arc;

/// Handles chat room membership events
pub struct RoomHandler;

impl RoomHandler {
    /// Handle a chat:join event
    ///
    /// An admin joining marks the chat's unread visitor messages read and
    /// broadcasts the read receipt to the whole room, the admin included.
    /// The receipt goes out even when nothing was unread.
    pub async fn join(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: RoomPayload,
    ) -> HandlerResult<()> {
        let room = chat_room(payload.chat_id);
        state.rooms().join(&room, connection.session_id());

        tracing::debug!(
            session_id = %connection.session_id(),
            chat_id = %payload.chat_id,
            "Session joined chat room"
        );

        if let Participant::Admin { id } = connection.participant() {
            let admin_id = *id;
            let marked = MessageService::new(state.services())
                .mark_read(payload.chat_id, admin_id)
                .await?;

            state.router().send_to_room(
                &room,
                &ServerEvent::Read {
                    chat_id: payload.chat_id,
                    read_by: admin_id,
                },
            );

            tracing::debug!(
                chat_id = %payload.chat_id,
                admin_id = %admin_id,
                marked = marked,
                "Read receipt broadcast"
            );
        }

        Ok(())
    }

    /// Handle a chat:leave event
    pub fn leave(state: &GatewayState, connection: &Arc<Connection>, payload: RoomPayload) {
        let room = chat_room(payload.chat_id);
        state.rooms().leave(&room, connection.session_id());

        tracing::debug!(
            session_id = %connection.session_id(),
            chat_id = %payload.chat_id,
            "Session left chat room"
        );
    }
}
