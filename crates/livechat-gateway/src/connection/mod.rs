//! Connection management
//!
//! WebSocket connections, the participants behind them, and the session
//! registry that tracks all of them.

mod connection;
mod registry;

pub use connection::{Connection, Participant};
pub use registry::SessionRegistry;
