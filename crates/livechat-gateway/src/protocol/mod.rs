//! Gateway wire protocol
//!
//! Client and server event envelopes exchanged over the WebSocket.

mod events;

pub use events::{ClientEvent, RoomPayload, SendMessagePayload, ServerEvent};
