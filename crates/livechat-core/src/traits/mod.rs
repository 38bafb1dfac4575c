//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ChatQuery, ChatRepository, DeviceRepository, MessageRepository, RepoResult, VisitorRepository,
};
