//! # livechat-gateway
//!
//! WebSocket gateway for real-time chat: sessions, rooms, and the event
//! pipeline between visitors and admins.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod rooms;
pub mod server;

pub use server::{create_app, create_gateway_state, run, GatewayState};
