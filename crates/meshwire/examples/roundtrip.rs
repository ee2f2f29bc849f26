//! Encode a signed lobby message, then decode it back through the default
//! registry and print what came out.
//!
//! Run with `cargo run -p meshwire --example roundtrip`.

use tracing_subscriber::{fmt, EnvFilter};

use meshwire::core::{serialize_to_vec, StreamReader};
use meshwire::items::{default_registry, ChatMsg, LobbyBounce, LobbyMsg};

fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut item = LobbyMsg {
        msg: ChatMsg {
            chat_flags: 0x0001,
            send_time: 1_700_000_000,
            message: "hello, lobby".into(),
        },
        parent_msg_id: 0,
        bounce: LobbyBounce {
            lobby_id: 0xB0B0_CAFE,
            msg_id: 42,
            nick: "alice".into(),
            signature: b"not-a-real-signature".as_ref().into(),
        },
    };

    let frame = serialize_to_vec(&mut item, 0).expect("encode failed");
    tracing::info!(bytes = frame.len(), "encoded lobby message");

    let registry = default_registry();
    let mut reader = StreamReader::new(&registry, &frame, 0);
    while let Some((id, decoded)) = reader.next_item().expect("decode failed") {
        tracing::info!(?id, ?decoded, "decoded item");
    }
}
