//! Chat service items: direct messages, presence status, avatars, and the
//! persisted private-chat record.
//!
//! The lobby variants share this service's subtype namespace; their field
//! layouts live in [`crate::lobby`].

use std::any::Any;

use bytes::Bytes;

use meshwire_core::wire::tlv::tag;
use meshwire_core::{Item, Result, SerialCtx, SerialFlags, WireFields};

use crate::lobby::{
    LobbyChallenge, LobbyConfig, LobbyEvent, LobbyInvite, LobbyList, LobbyListRequest, LobbyMsg,
    LobbyUnsubscribe,
};

/// Chat service id.
pub const SERVICE_CHAT: u16 = 0x0012;

/// Strip the signature TLV from signed lobby envelopes. Used when encoding
/// the byte span a signature covers, and when decoding such a span.
pub const SERIAL_FLAG_SKIP_SIGNATURE: SerialFlags = 0x0001;

/// Subtype namespace owned by the chat service.
pub mod subtype {
    pub const MSG: u8 = 0x01;
    pub const PRIVATE_MSG_CONFIG: u8 = 0x02;
    pub const STATUS: u8 = 0x03;
    pub const AVATAR: u8 = 0x04;
    pub const LOBBY_SIGNED_MSG: u8 = 0x05;
    pub const LOBBY_INVITE: u8 = 0x06;
    pub const LOBBY_CHALLENGE: u8 = 0x07;
    pub const LOBBY_UNSUBSCRIBE: u8 = 0x08;
    pub const LOBBY_SIGNED_EVENT: u8 = 0x09;
    pub const LOBBY_LIST_REQUEST: u8 = 0x0A;
    pub const LOBBY_LIST: u8 = 0x0B;
    pub const LOBBY_CONFIG: u8 = 0x0C;
}

/// Plain chat message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatMsg {
    pub chat_flags: u32,
    pub send_time: u32,
    pub message: String,
}

impl WireFields for ChatMsg {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u32_field(&mut self.chat_flags, "chat_flags")?;
        ctx.u32_field(&mut self.send_time, "send_time")?;
        ctx.str_field(tag::STR_MSG, &mut self.message, "message")
    }
}

impl Item for ChatMsg {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::MSG
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Presence / typing status notification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatStatus {
    pub flags: u32,
    pub status: String,
}

impl WireFields for ChatStatus {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u32_field(&mut self.flags, "flags")?;
        ctx.str_field(tag::STR_MSG, &mut self.status, "status")
    }
}

impl Item for ChatStatus {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::STATUS
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Avatar image transfer. The item owns the image bytes exclusively;
/// `Bytes` moves without copying and releases the allocation exactly once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatAvatar {
    pub image: Bytes,
}

impl WireFields for ChatAvatar {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.blob_field(tag::BIN_IMAGE, &mut self.image, "image")
    }
}

impl Item for ChatAvatar {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::AVATAR
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Persisted private-chat record.
///
/// Kept for chat history across restarts; mirrors [`ChatMsg`] plus the
/// peer and local receive time. The leading reserved word is a legacy
/// placeholder: always written as zero, ignored on read.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrivateChatConfig {
    pub peer_id: String,
    pub chat_flags: u32,
    pub send_time: u32,
    pub message: String,
    pub recv_time: u32,
    /// Persistence bookkeeping flags; not on the wire.
    pub config_flags: u32,
}

impl PrivateChatConfig {
    /// Capture a live chat message for persistence. Plain field copies,
    /// no serialization involved.
    pub fn set_from(&mut self, msg: &ChatMsg, peer_id: &str, config_flags: u32, recv_time: u32) {
        self.peer_id = peer_id.to_owned();
        self.chat_flags = msg.chat_flags;
        self.send_time = msg.send_time;
        self.message = msg.message.clone();
        self.recv_time = recv_time;
        self.config_flags = config_flags;
    }

    /// Restore the persisted record into a live chat message. The peer id
    /// and receive time stay on `self`; callers read them directly.
    pub fn apply_to(&self, msg: &mut ChatMsg) {
        msg.chat_flags = self.chat_flags;
        msg.send_time = self.send_time;
        msg.message = self.message.clone();
    }
}

impl WireFields for PrivateChatConfig {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        let mut reserved = 0u32;
        ctx.u32_field(&mut reserved, "reserved")?;
        ctx.str_field(tag::STR_PEER_ID, &mut self.peer_id, "peer_id")?;
        ctx.u32_field(&mut self.chat_flags, "chat_flags")?;
        ctx.u32_field(&mut self.send_time, "send_time")?;
        ctx.str_field(tag::STR_MSG, &mut self.message, "message")?;
        ctx.u32_field(&mut self.recv_time, "recv_time")
    }
}

impl Item for PrivateChatConfig {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::PRIVATE_MSG_CONFIG
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Factory covering every chat-service subtype, lobby variants included.
pub struct ChatItemFactory;

impl meshwire_core::ItemFactory for ChatItemFactory {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }

    fn create(&self, subtype: u8) -> Option<Box<dyn Item>> {
        match subtype {
            subtype::MSG => Some(Box::new(ChatMsg::default())),
            subtype::PRIVATE_MSG_CONFIG => Some(Box::new(PrivateChatConfig::default())),
            subtype::STATUS => Some(Box::new(ChatStatus::default())),
            subtype::AVATAR => Some(Box::new(ChatAvatar::default())),
            subtype::LOBBY_SIGNED_MSG => Some(Box::new(LobbyMsg::default())),
            subtype::LOBBY_INVITE => Some(Box::new(LobbyInvite::default())),
            subtype::LOBBY_CHALLENGE => Some(Box::new(LobbyChallenge::default())),
            subtype::LOBBY_UNSUBSCRIBE => Some(Box::new(LobbyUnsubscribe::default())),
            subtype::LOBBY_SIGNED_EVENT => Some(Box::new(LobbyEvent::default())),
            subtype::LOBBY_LIST_REQUEST => Some(Box::new(LobbyListRequest::default())),
            subtype::LOBBY_LIST => Some(Box::new(LobbyList::default())),
            subtype::LOBBY_CONFIG => Some(Box::new(LobbyConfig::default())),
            _ => None,
        }
    }
}
