//! Message handler (chat:message)

use super::HandlerResult;
use crate::connection::{Connection, Participant};
use crate::protocol::{SendMessagePayload, ServerEvent};
use crate::rooms::{chat_room, ADMINS_ROOM};
use crate::server::GatewayState;
use livechat_push::PushNotification;
use livechat_service::dto::CreateMessageRequest;
use livechat_service::{MessageService, PushService};
use serde_json::json;
use std::sync::Arc;

/// Character budget for the push notification body
const PUSH_PREVIEW_CHARS: usize = 100;

/// Handles chat:message events
pub struct MessageHandler;

impl MessageHandler {
    /// Handle a chat:message event
    ///
    /// Persists first and broadcasts after; a persistence failure aborts the
    /// pipeline and nothing is emitted. Visitor messages additionally notify
    /// the admins room and fire a push notification once the broadcasts are
    /// out.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: SendMessagePayload,
    ) -> HandlerResult<()> {
        let participant = connection.participant();
        let Some(sender_kind) = participant.sender_kind() else {
            return Ok(());
        };

        let request = CreateMessageRequest {
            chat_id: payload.chat_id,
            sender_id: participant.sender_id(),
            sender_kind,
            content: payload.content,
            kind: payload.kind,
        };

        let message = MessageService::new(state.services())
            .create_message(request)
            .await?;

        let room = chat_room(payload.chat_id);
        let delivered = state
            .router()
            .send_to_room(&room, &ServerEvent::Message(message.clone()));

        tracing::debug!(
            chat_id = %payload.chat_id,
            message_id = %message.id,
            delivered = delivered,
            "Message echoed to chat room"
        );

        if matches!(participant, Participant::Visitor { .. }) {
            let body: String = message.content.chars().take(PUSH_PREVIEW_CHARS).collect();

            state.router().send_to_room(
                ADMINS_ROOM,
                &ServerEvent::NewMessage {
                    chat_id: payload.chat_id,
                    message,
                },
            );

            let notification = PushNotification::new("New Message", body)
                .with_data(json!({ "chatId": payload.chat_id }));
            PushService::new(state.services())
                .notify_admins(notification)
                .await;
        }

        Ok(())
    }
}
