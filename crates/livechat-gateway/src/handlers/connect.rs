//! Connection lifecycle
//!
//! Authenticates the handshake, registers the session, and tears everything
//! down again on disconnect.

use crate::connection::{Connection, Participant};
use crate::protocol::ServerEvent;
use crate::rooms::ADMINS_ROOM;
use crate::server::GatewayState;
use livechat_common::{AppError, JwtService};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Query parameters sent with the WebSocket handshake
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    /// Admin JWT, with or without a `Bearer ` prefix
    pub token: Option<String>,
    /// Client-generated visitor identifier
    pub visitor_id: Option<String>,
}

/// Handles connection setup and teardown
pub struct ConnectHandler;

impl ConnectHandler {
    /// Decide who is connecting
    ///
    /// A token always wins: a valid one yields an admin, an invalid one is an
    /// error that closes the socket. Without a token, a non-empty `visitorId`
    /// yields a visitor and anything else an unauthenticated session.
    pub fn authenticate(params: &ConnectParams, jwt: &JwtService) -> Result<Participant, AppError> {
        if let Some(token) = params.token.as_deref() {
            let token = token.strip_prefix("Bearer ").unwrap_or(token);
            let claims = jwt.verify(token)?;
            let id = claims.admin_id()?;
            return Ok(Participant::Admin { id });
        }

        match params.visitor_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(Participant::Visitor { id: id.to_string() }),
            _ => Ok(Participant::Unauthenticated),
        }
    }

    /// Register a new session and announce it
    ///
    /// Admins are marked online, joined to the shared admin room, and
    /// announced to every session. Visitors are only marked online.
    /// Presence failures are logged and the connection proceeds.
    pub async fn register(
        state: &GatewayState,
        participant: Participant,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Arc<Connection> {
        let session_id = Uuid::new_v4().to_string();
        let connection = state.sessions().register(session_id, participant, sender);

        match connection.participant() {
            Participant::Admin { id } => {
                let admin_id = *id;
                if let Err(e) = state
                    .services()
                    .presence_store()
                    .set_online(&admin_id.to_string(), connection.session_id())
                    .await
                {
                    tracing::warn!(
                        admin_id = %admin_id,
                        error = %e,
                        "Failed to record online presence"
                    );
                }

                state.rooms().join(ADMINS_ROOM, connection.session_id());
                let delivered = state.router().broadcast(&ServerEvent::AdminOnline { admin_id });

                tracing::info!(
                    session_id = %connection.session_id(),
                    admin_id = %admin_id,
                    delivered = delivered,
                    "Admin connected"
                );
            }
            Participant::Visitor { id } => {
                if let Err(e) = state
                    .services()
                    .presence_store()
                    .set_online(id, connection.session_id())
                    .await
                {
                    tracing::warn!(
                        visitor_id = %id,
                        error = %e,
                        "Failed to record online presence"
                    );
                }

                tracing::info!(
                    session_id = %connection.session_id(),
                    visitor_id = %id,
                    "Visitor connected"
                );
            }
            Participant::Unauthenticated => {
                tracing::info!(
                    session_id = %connection.session_id(),
                    "Unauthenticated session connected"
                );
            }
        }

        connection
    }

    /// Tear a session down
    ///
    /// Removes the session first so the departing admin's offline
    /// announcement reaches only the survivors.
    pub async fn disconnect(state: &GatewayState, connection: &Connection) {
        state.sessions().remove(connection.session_id());
        state.rooms().leave_all(connection.session_id());

        match connection.participant() {
            Participant::Admin { id } => {
                let admin_id = *id;
                if let Err(e) = state
                    .services()
                    .presence_store()
                    .set_offline(&admin_id.to_string())
                    .await
                {
                    tracing::warn!(
                        admin_id = %admin_id,
                        error = %e,
                        "Failed to clear online presence"
                    );
                }

                state
                    .router()
                    .broadcast(&ServerEvent::AdminOffline { admin_id });

                tracing::info!(
                    session_id = %connection.session_id(),
                    admin_id = %admin_id,
                    "Admin disconnected"
                );
            }
            Participant::Visitor { id } => {
                if let Err(e) = state.services().presence_store().set_offline(id).await {
                    tracing::warn!(
                        visitor_id = %id,
                        error = %e,
                        "Failed to clear online presence"
                    );
                }

                tracing::info!(
                    session_id = %connection.session_id(),
                    visitor_id = %id,
                    "Visitor disconnected"
                );
            }
            Participant::Unauthenticated => {
                tracing::info!(
                    session_id = %connection.session_id(),
                    "Unauthenticated session disconnected"
                );
            }
        }
    }
}
