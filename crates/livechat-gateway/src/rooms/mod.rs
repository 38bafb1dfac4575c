//! Room membership and routing
//!
//! One room per chat conversation plus a shared admin room; the router
//! fans events out to room members.

mod registry;
mod router;

pub use registry::{chat_room, RoomRegistry, ADMINS_ROOM};
pub use router::RoomRouter;
