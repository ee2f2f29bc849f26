//! Wire grammar (primitives, TLV, packet header, field processor).
//!
//! Packet layout, all integers big-endian:
//!
//! ```text
//! offset 0      version        u8
//! offset 1..3   service id     u16
//! offset 3      subtype        u8
//! offset 4..8   total length   u32   (includes these 8 header bytes)
//! offset 8..    field payload  (variant-specific)
//! ```
//!
//! Variable-size fields use TLV sub-encoding: `tag:u16, len:u32, payload:
//! len bytes` (string payloads are raw UTF-8, no terminator).
//!
//! All parsers are panic-free: malformed input is reported as `WireError`
//! instead of panicking or indexing raw buffers.

pub mod base;
pub mod header;
pub mod process;
pub mod tlv;
