//! Connection state
//!
//! Represents an individual WebSocket connection and who is behind it.

use crate::protocol::ServerEvent;
use livechat_core::SenderKind;
use std::time::Instant;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Who is behind a connection
///
/// Decided once at handshake time and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    /// Connected without credentials; chat events from it are ignored
    Unauthenticated,
    /// Authenticated admin (JWT subject)
    Admin { id: Uuid },
    /// Visitor identified by its client-generated id
    Visitor { id: String },
}

impl Participant {
    /// Whether this participant may send chat events
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    /// Message sender id (admins only; visitors persist with a NULL sender)
    #[must_use]
    pub fn sender_id(&self) -> Option<Uuid> {
        match self {
            Self::Admin { id } => Some(*id),
            _ => None,
        }
    }

    /// Message sender kind, if the participant is authenticated
    #[must_use]
    pub fn sender_kind(&self) -> Option<SenderKind> {
        match self {
            Self::Admin { .. } => Some(SenderKind::Admin),
            Self::Visitor { .. } => Some(SenderKind::Visitor),
            Self::Unauthenticated => None,
        }
    }

    /// Presence key for this participant, if authenticated
    #[must_use]
    pub fn participant_id(&self) -> Option<String> {
        match self {
            Self::Admin { id } => Some(id.to_string()),
            Self::Visitor { id } => Some(id.clone()),
            Self::Unauthenticated => None,
        }
    }
}

/// An individual WebSocket connection
///
/// Holds the outbound event queue; the socket tasks live in the server module.
pub struct Connection {
    /// Unique session identifier
    session_id: String,

    /// Who is connected
    participant: Participant,

    /// Channel for sending events to this connection's socket
    sender: mpsc::Sender<ServerEvent>,

    /// When the connection was established
    connected_at: Instant,
}

impl Connection {
    /// Create a new connection
    #[must_use]
    pub fn new(session_id: String, participant: Participant, sender: mpsc::Sender<ServerEvent>) -> Self {
        Self {
            session_id,
            participant,
            sender,
            connected_at: Instant::now(),
        }
    }

    /// Get the session ID
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get the participant behind this connection
    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// Queue an event without blocking
    ///
    /// Fails when the per-connection queue is full or the receiver is gone;
    /// callers count that as a failed delivery.
    pub fn try_send(&self, event: ServerEvent) -> Result<(), mpsc::error::TrySendError<ServerEvent>> {
        self.sender.try_send(event)
    }

    /// Check if the connection's outbound channel is closed
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// How long the connection has been open
    #[must_use]
    pub fn uptime(&self) -> std::time::Duration {
        self.connected_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("participant", &self.participant)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}
