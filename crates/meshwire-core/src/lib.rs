//! meshwire core: transport-agnostic packet serialization primitives.
//!
//! This crate defines the wire-level contracts shared by the item families
//! and by embedding applications: a bounds-checked primitive codec, a TLV
//! codec for variable-size fields, the three-pass field processor, the
//! packet header, and the service registry. It intentionally carries no
//! transport or runtime dependencies so it can be reused in multiple
//! contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `WireError`/`Result` so processes
//! decoding hostile traffic do not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod item;
pub mod registry;
pub mod wire;

pub use error::{ErrorCode, Result, WireError};
pub use item::{serialize, serialize_to_vec, size_of, Item, PacketId};
pub use registry::{ItemFactory, Registry, StreamReader};
pub use wire::header::{ItemHeader, HEADER_LEN, VERSION_SERVICE};
pub use wire::process::{SerialCtx, SerialFlags, WireFields};
