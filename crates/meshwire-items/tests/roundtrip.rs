//! Round-trip and size/write agreement for every built-in item variant.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use meshwire_core::wire::tlv::tlv_len;
use meshwire_core::{serialize_to_vec, size_of, ErrorCode, Item, SerialFlags};
use meshwire_items::chat::SERIAL_FLAG_SKIP_SIGNATURE;
use meshwire_items::{
    default_registry, BlogProfile, ChatAvatar, ChatMsg, ChatStatus, KvPair, LobbyBounce,
    LobbyChallenge, LobbyConfig, LobbyEvent, LobbyInfo, LobbyInvite, LobbyList, LobbyListRequest,
    LobbyMsg, LobbyUnsubscribe, PrivateChatConfig,
};

/// Encode, check size agreement, decode through the registry, downcast.
fn roundtrip<T>(item: &T, flags: SerialFlags) -> T
where
    T: Item + Clone + PartialEq + 'static,
{
    let mut src = item.clone();
    let bytes = serialize_to_vec(&mut src, flags).unwrap();
    assert_eq!(bytes.len(), size_of(&mut src, flags).unwrap(), "size/write disagreement");

    let registry = default_registry();
    let (decoded, used) = registry.deserialize(&bytes, flags).unwrap();
    assert_eq!(used, bytes.len(), "consumed bytes != frame length");
    decoded.as_any().downcast_ref::<T>().unwrap().clone()
}

fn sample_bounce() -> LobbyBounce {
    LobbyBounce {
        lobby_id: 0xAABB_CCDD_EEFF_0011,
        msg_id: 77,
        nick: "alice".into(),
        signature: Bytes::from_static(&[0x30, 0x45, 0x02, 0x21, 0x00]),
    }
}

#[test]
fn chat_msg() {
    let item = ChatMsg { chat_flags: 0x40, send_time: 1_700_000_000, message: "hi ÿou".into() };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn chat_status() {
    let item = ChatStatus { flags: 0x1, status: "away".into() };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn chat_avatar_owns_binary_payload() {
    let image: Vec<u8> = (0..=255u8).cycle().take(1024).collect();
    let item = ChatAvatar { image: Bytes::from(image) };
    let decoded = roundtrip(&item, 0);
    assert_eq!(decoded, item);
    // decoded blob is an independent owned buffer
    drop(item);
    assert_eq!(decoded.image.len(), 1024);
}

#[test]
fn private_chat_config() {
    let item = PrivateChatConfig {
        peer_id: "peer-42".into(),
        chat_flags: 3,
        send_time: 100,
        message: "offline msg".into(),
        recv_time: 140,
        config_flags: 0,
    };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn private_chat_config_placeholder_is_ignored_on_read() {
    let mut item = PrivateChatConfig { peer_id: "p".into(), ..Default::default() };
    let mut bytes = serialize_to_vec(&mut item, 0).unwrap();
    // the reserved word sits right after the header and is always zero
    assert_eq!(&bytes[8..12], &[0, 0, 0, 0]);

    bytes[8..12].copy_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
    let registry = default_registry();
    let (decoded, _) = registry.deserialize(&bytes, 0).unwrap();
    assert_eq!(decoded.as_any().downcast_ref::<PrivateChatConfig>().unwrap(), &item);
}

#[test]
fn private_chat_config_copies_live_messages() {
    let msg = ChatMsg { chat_flags: 9, send_time: 500, message: "persist me".into() };
    let mut record = PrivateChatConfig::default();
    record.set_from(&msg, "peer-1", 0x8000, 550);
    assert_eq!(record.peer_id, "peer-1");
    assert_eq!(record.recv_time, 550);
    assert_eq!(record.config_flags, 0x8000);

    let mut restored = ChatMsg::default();
    record.apply_to(&mut restored);
    assert_eq!(restored, msg);
}

#[test]
fn lobby_msg_signed() {
    let item = LobbyMsg {
        msg: ChatMsg { chat_flags: 1, send_time: 7, message: "bounced".into() },
        parent_msg_id: 3,
        bounce: sample_bounce(),
    };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_msg_skip_signature_omits_the_tlv() {
    let mut signed = LobbyMsg {
        msg: ChatMsg::default(),
        parent_msg_id: 0,
        bounce: sample_bounce(),
    };
    let mut unsigned = signed.clone();

    let with_sig = serialize_to_vec(&mut signed, 0).unwrap();
    let without_sig = serialize_to_vec(&mut unsigned, SERIAL_FLAG_SKIP_SIGNATURE).unwrap();
    assert_eq!(
        with_sig.len() - without_sig.len(),
        tlv_len(sample_bounce().signature.len())
    );

    let decoded = roundtrip(&unsigned, SERIAL_FLAG_SKIP_SIGNATURE);
    assert!(decoded.bounce.signature.is_empty());
    assert_eq!(decoded.bounce.nick, "alice");
}

#[test]
fn signature_flag_mismatch_is_rejected() {
    let registry = default_registry();
    let mut item = LobbyMsg { bounce: sample_bounce(), ..Default::default() };

    // encoded without a signature, decoded expecting one: runs out of bytes
    let without_sig = serialize_to_vec(&mut item, SERIAL_FLAG_SKIP_SIGNATURE).unwrap();
    let err = registry.deserialize(&without_sig, 0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Truncated);

    // encoded with a signature, decoded while skipping it: bytes left over
    let with_sig = serialize_to_vec(&mut item, 0).unwrap();
    let err = registry.deserialize(&with_sig, SERIAL_FLAG_SKIP_SIGNATURE).unwrap_err();
    assert_eq!(err.code(), ErrorCode::LengthMismatch);
}

#[test]
fn lobby_invite() {
    let item = LobbyInvite { lobby_id: 5, lobby_name: "rustaceans".into(), lobby_flags: 2 };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_challenge() {
    let item = LobbyChallenge { challenge_code: u64::MAX };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_unsubscribe() {
    let item = LobbyUnsubscribe { lobby_id: 9 };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_event() {
    let item = LobbyEvent {
        event_type: 2,
        detail: "bob→robert".into(),
        send_time: 123,
        bounce: sample_bounce(),
    };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_list_request_is_header_only() {
    let mut item = LobbyListRequest::default();
    let bytes = serialize_to_vec(&mut item, 0).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_list() {
    let item = LobbyList {
        lobbies: vec![
            LobbyInfo { id: 1, name: "general".into(), topic: "anything".into(), count: 12, flags: 0 },
            LobbyInfo { id: 2, name: "dev".into(), topic: "".into(), count: 0, flags: 5 },
        ],
    };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn empty_lobby_list_is_a_zero_count_tlv() {
    let item = LobbyList::default();
    let mut src = item.clone();
    let bytes = serialize_to_vec(&mut src, 0).unwrap();
    // header + count TLV holding u32 zero, nothing after
    assert_eq!(bytes.len(), 8 + tlv_len(4));
    assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn lobby_config() {
    let item = LobbyConfig { lobby_id: 11, flags: 0x30 };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn blog_profile() {
    let item = BlogProfile {
        timestamp: 1_600_000_000,
        profile: vec![
            KvPair { key: "name".into(), value: "alice".into() },
            KvPair { key: "bio".into(), value: "writes things".into() },
        ],
    };
    assert_eq!(roundtrip(&item, 0), item);
}

#[test]
fn truncating_any_frame_fails_decode() {
    let registry = default_registry();
    let mut item = LobbyEvent {
        event_type: 1,
        detail: "joined".into(),
        send_time: 9,
        bounce: sample_bounce(),
    };
    let bytes = serialize_to_vec(&mut item, 0).unwrap();

    for cut in [bytes.len() - 1, bytes.len() / 2, 9, 8] {
        let err = registry.deserialize(&bytes[..cut], 0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Truncated, "cut at {cut}");
    }
}
