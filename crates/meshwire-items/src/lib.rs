//! Built-in item families for the meshwire chat mesh.
//!
//! Each variant declares its wire layout once against the core field
//! processor; the chat and blog factories plug the variants into a
//! [`Registry`]. Shared field groups (the lobby bounce envelope) are plain
//! structs spliced into each variant's declaration in a fixed position.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::sync::Arc;

use meshwire_core::Registry;

pub mod blog;
pub mod chat;
pub mod lobby;

pub use chat::{ChatAvatar, ChatItemFactory, ChatMsg, ChatStatus, PrivateChatConfig};
pub use lobby::{
    LobbyBounce, LobbyChallenge, LobbyConfig, LobbyEvent, LobbyInfo, LobbyInvite, LobbyList,
    LobbyListRequest, LobbyMsg, LobbyUnsubscribe,
};
pub use blog::{BlogItemFactory, BlogProfile, KvPair};

/// A registry with every built-in service registered.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(Arc::new(ChatItemFactory));
    registry.register(Arc::new(BlogItemFactory));
    registry
}
