//! Client event handlers
//!
//! Routes incoming WebSocket events to the handler for their event name.

mod connect;
mod error;
mod message;
mod room;
mod typing;

pub use connect::{ConnectHandler, ConnectParams};
pub use error::{HandlerError, HandlerResult};
pub use message::MessageHandler;
pub use room::RoomHandler;
pub use typing::TypingHandler;

use crate::connection::Connection;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client events to their handlers
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle a raw text frame from a client
    ///
    /// Malformed frames and events from unauthenticated sessions are logged
    /// at debug and dropped; they are never errors.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        raw: &str,
    ) -> HandlerResult<()> {
        let event = match ClientEvent::from_json(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(
                    session_id = %connection.session_id(),
                    error = %e,
                    "Ignoring malformed client event"
                );
                return Ok(());
            }
        };

        if !connection.participant().is_authenticated() {
            tracing::debug!(
                session_id = %connection.session_id(),
                event = event.name(),
                "Ignoring event from unauthenticated session"
            );
            return Ok(());
        }

        tracing::trace!(
            session_id = %connection.session_id(),
            event = event.name(),
            "Handling client event"
        );

        match event {
            ClientEvent::Join(payload) => RoomHandler::join(state, connection, payload).await,
            ClientEvent::Leave(payload) => {
                RoomHandler::leave(state, connection, payload);
                Ok(())
            }
            ClientEvent::Message(payload) => {
                MessageHandler::handle(state, connection, payload).await
            }
            ClientEvent::Typing(payload) => TypingHandler::start(state, connection, payload).await,
            ClientEvent::StopTyping(payload) => {
                TypingHandler::stop(state, connection, payload);
                Ok(())
            }
        }
    }
}
