//! Gateway state
//!
//! Application state shared by the WebSocket server and the handlers.

use crate::connection::SessionRegistry;
use crate::rooms::{RoomRegistry, RoomRouter};
use livechat_common::JwtService;
use livechat_service::ServiceContext;
use std::sync::Arc;

/// Gateway application state
///
/// Holds the service context, the in-process registries, and the router
/// that connects them.
#[derive(Clone)]
pub struct GatewayState {
    /// Service context with repositories, presence store, and push provider
    services: Arc<ServiceContext>,
    /// Registry of active WebSocket sessions
    sessions: Arc<SessionRegistry>,
    /// Registry of room memberships
    rooms: Arc<RoomRegistry>,
    /// Router delivering events to room members
    router: Arc<RoomRouter>,
    /// Verifies admin tokens at handshake time
    jwt: Arc<JwtService>,
}

impl GatewayState {
    /// Create a new gateway state with fresh registries
    #[must_use]
    pub fn new(services: ServiceContext, jwt: JwtService) -> Self {
        let sessions = SessionRegistry::new_shared();
        let rooms = RoomRegistry::new_shared();
        let router = Arc::new(RoomRouter::new(sessions.clone(), rooms.clone()));

        Self {
            services: Arc::new(services),
            sessions,
            rooms,
            router,
            jwt: Arc::new(jwt),
        }
    }

    /// Get the service context
    #[must_use]
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the session registry
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Get the room registry
    #[must_use]
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Get the room router
    #[must_use]
    pub fn router(&self) -> &RoomRouter {
        &self.router
    }

    /// Get the JWT service
    #[must_use]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("sessions", &self.sessions.session_count())
            .field("rooms", &self.rooms.room_count())
            .finish_non_exhaustive()
    }
}
