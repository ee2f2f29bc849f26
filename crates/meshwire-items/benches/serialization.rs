use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use meshwire_core::{serialize_to_vec, Registry};
use meshwire_items::{default_registry, ChatMsg, LobbyInfo, LobbyList};

fn sample_chat_msg() -> ChatMsg {
    ChatMsg {
        chat_flags: 0x1,
        send_time: 1_700_000_000,
        message: "benchmark message with a typical chat length".into(),
    }
}

fn sample_lobby_list() -> LobbyList {
    LobbyList {
        lobbies: (0..16)
            .map(|i| LobbyInfo {
                id: i,
                name: format!("lobby-{i}"),
                topic: "a reasonably sized topic string".into(),
                count: (i * 3) as u32,
                flags: 0,
            })
            .collect(),
    }
}

fn bench_chat_msg(c: &mut Criterion, registry: &Registry) {
    let item = sample_chat_msg();
    c.bench_with_input(BenchmarkId::new("serialize", "chat_msg"), &item, |b, item| {
        b.iter(|| serialize_to_vec(&mut black_box(item.clone()), 0).unwrap());
    });

    let bytes = serialize_to_vec(&mut sample_chat_msg(), 0).unwrap();
    c.bench_with_input(BenchmarkId::new("deserialize", "chat_msg"), &bytes, |b, bytes| {
        b.iter(|| registry.deserialize(black_box(bytes), 0).unwrap());
    });
}

fn bench_lobby_list(c: &mut Criterion, registry: &Registry) {
    let item = sample_lobby_list();
    c.bench_with_input(BenchmarkId::new("serialize", "lobby_list_16"), &item, |b, item| {
        b.iter(|| serialize_to_vec(&mut black_box(item.clone()), 0).unwrap());
    });

    let bytes = serialize_to_vec(&mut sample_lobby_list(), 0).unwrap();
    c.bench_with_input(BenchmarkId::new("deserialize", "lobby_list_16"), &bytes, |b, bytes| {
        b.iter(|| registry.deserialize(black_box(bytes), 0).unwrap());
    });
}

fn item_benches(c: &mut Criterion) {
    let registry = default_registry();
    bench_chat_msg(c, &registry);
    bench_lobby_list(c, &registry);
}

criterion_group!(benches, item_benches);
criterion_main!(benches);
