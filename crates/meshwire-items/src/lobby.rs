//! Lobby items: bounced messages and events, invites, subscription
//! management, and the public lobby list.
//!
//! Lobby variants live in the chat service's subtype namespace (see
//! [`crate::chat::subtype`]).

use std::any::Any;

use bytes::Bytes;

use meshwire_core::wire::tlv::tag;
use meshwire_core::{Item, Result, SerialCtx, SerialFlags, WireFields};

use crate::chat::{subtype, ChatMsg, SERIAL_FLAG_SKIP_SIGNATURE, SERVICE_CHAT};

/// Envelope fields shared by every payload that bounces between lobby
/// participants: which lobby, which message, who said it, and an opaque
/// signature over the rest.
///
/// Spliced verbatim into each bounced variant's field list; not a base
/// class, just a struct processed in-line at a fixed position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyBounce {
    pub lobby_id: u64,
    pub msg_id: u64,
    pub nick: String,
    /// Opaque signature blob. Absent on the wire when the skip-signature
    /// flag is set (that span is what gets signed).
    pub signature: Bytes,
}

impl LobbyBounce {
    /// The one predicate deciding signature presence. Every pass consults
    /// this against the same flags, so size and read/write cannot diverge
    /// on whether the TLV exists.
    fn signature_present(flags: SerialFlags) -> bool {
        flags & SERIAL_FLAG_SKIP_SIGNATURE == 0
    }
}

impl WireFields for LobbyBounce {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.lobby_id, "lobby_id")?;
        ctx.u64_field(&mut self.msg_id, "msg_id")?;
        ctx.str_field(tag::STR_NAME, &mut self.nick, "nick")?;
        if Self::signature_present(ctx.flags()) {
            ctx.blob_field(tag::BIN_SIGN, &mut self.signature, "signature")?;
        }
        Ok(())
    }
}

/// A chat message bounced through a lobby.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyMsg {
    pub msg: ChatMsg,
    /// Message this one replies to; zero when not a reply.
    pub parent_msg_id: u64,
    pub bounce: LobbyBounce,
}

impl WireFields for LobbyMsg {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        self.msg.wire_fields(ctx)?;
        ctx.u64_field(&mut self.parent_msg_id, "parent_msg_id")?;
        self.bounce.wire_fields(ctx)
    }
}

impl Item for LobbyMsg {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_SIGNED_MSG
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Invitation to join a lobby.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyInvite {
    pub lobby_id: u64,
    pub lobby_name: String,
    pub lobby_flags: u32,
}

impl WireFields for LobbyInvite {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.lobby_id, "lobby_id")?;
        ctx.str_field(tag::STR_NAME, &mut self.lobby_name, "lobby_name")?;
        ctx.u32_field(&mut self.lobby_flags, "lobby_flags")
    }
}

impl Item for LobbyInvite {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_INVITE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Connection challenge exchanged while joining a lobby.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyChallenge {
    pub challenge_code: u64,
}

impl WireFields for LobbyChallenge {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.challenge_code, "challenge_code")
    }
}

impl Item for LobbyChallenge {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_CHALLENGE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Notice that the sender is leaving a lobby.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyUnsubscribe {
    pub lobby_id: u64,
}

impl WireFields for LobbyUnsubscribe {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.lobby_id, "lobby_id")
    }
}

impl Item for LobbyUnsubscribe {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_UNSUBSCRIBE
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Membership event bounced through a lobby (joined, left, nick change).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyEvent {
    pub event_type: u8,
    /// Event-dependent detail, e.g. the new nickname.
    pub detail: String,
    pub send_time: u32,
    pub bounce: LobbyBounce,
}

impl WireFields for LobbyEvent {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u8_field(&mut self.event_type, "event_type")?;
        ctx.str_field(tag::STR_NAME, &mut self.detail, "detail")?;
        ctx.u32_field(&mut self.send_time, "send_time")?;
        self.bounce.wire_fields(ctx)
    }
}

impl Item for LobbyEvent {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_SIGNED_EVENT
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Request for the peer's visible lobby list. Empty body; the header alone
/// carries the request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyListRequest {}

impl WireFields for LobbyListRequest {
    fn wire_fields(&mut self, _ctx: &mut SerialCtx<'_>) -> Result<()> {
        Ok(())
    }
}

impl Item for LobbyListRequest {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_LIST_REQUEST
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One advertised lobby in a [`LobbyList`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyInfo {
    pub id: u64,
    pub name: String,
    pub topic: String,
    /// Current participant count as seen by the sender.
    pub count: u32,
    pub flags: u32,
}

impl WireFields for LobbyInfo {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.id, "id")?;
        ctx.str_field(tag::STR_NAME, &mut self.name, "name")?;
        ctx.str_field(tag::STR_NAME, &mut self.topic, "topic")?;
        ctx.u32_field(&mut self.count, "count")?;
        ctx.u32_field(&mut self.flags, "flags")
    }
}

/// The sender's visible lobbies, in the order it advertises them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyList {
    pub lobbies: Vec<LobbyInfo>,
}

impl WireFields for LobbyList {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.seq_field(&mut self.lobbies, "lobbies")
    }
}

impl Item for LobbyList {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_LIST
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Persisted per-lobby configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    pub lobby_id: u64,
    pub flags: u32,
}

impl WireFields for LobbyConfig {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()> {
        ctx.u64_field(&mut self.lobby_id, "lobby_id")?;
        ctx.u32_field(&mut self.flags, "flags")
    }
}

impl Item for LobbyConfig {
    fn service(&self) -> u16 {
        SERVICE_CHAT
    }
    fn subtype(&self) -> u8 {
        subtype::LOBBY_CONFIG
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
