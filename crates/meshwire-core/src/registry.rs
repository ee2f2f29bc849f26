//! Service registry, item factories, and the packet stream reader.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, WireError};
use crate::item::{Item, PacketId};
use crate::wire::header::{ItemHeader, HEADER_LEN, VERSION_SERVICE};
use crate::wire::process::{SerialCtx, SerialFlags};

/// Creates default-constructed items for one service's subtype namespace.
pub trait ItemFactory: Send + Sync {
    /// Service id this factory owns.
    fn service(&self) -> u16;

    /// A fresh item for `subtype`, or `None` for unassigned subtypes.
    /// `None` is the ordinary forward-compatibility outcome, not an error.
    fn create(&self, subtype: u8) -> Option<Box<dyn Item>>;
}

/// Registry mapping service ids to item factories.
///
/// Registration is explicit and happens once at startup; lookups are
/// read-only afterwards, so a built registry can be shared freely across
/// decoding threads.
#[derive(Default)]
pub struct Registry {
    services: HashMap<u16, Arc<dyn ItemFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, factory: Arc<dyn ItemFactory>) {
        self.services.insert(factory.service(), factory);
    }

    pub fn registered_services(&self) -> Vec<u16> {
        self.services.keys().copied().collect()
    }

    /// Factory dispatch. `None` for an unknown service or subtype.
    pub fn create(&self, service: u16, subtype: u8) -> Option<Box<dyn Item>> {
        self.services.get(&service)?.create(subtype)
    }

    /// Decode one item from the front of `buf`, returning it with the byte
    /// count consumed.
    ///
    /// Order of checks: header, version, declared length against the
    /// available bytes, factory lookup, field read, exact-length audit.
    /// A packet whose declared length exceeds `buf` fails `Truncated`
    /// before the factory is consulted; any later failure discards the
    /// partially decoded item.
    pub fn deserialize(&self, buf: &[u8], flags: SerialFlags) -> Result<(Box<dyn Item>, usize)> {
        let header = ItemHeader::read(buf)?;
        if header.version != VERSION_SERVICE {
            return Err(WireError::UnsupportedVersion(header.version));
        }

        let declared = header.length as usize;
        if declared < HEADER_LEN {
            return Err(WireError::LengthMismatch { declared, consumed: HEADER_LEN });
        }
        if declared > buf.len() {
            return Err(WireError::Truncated);
        }

        let mut item = self.create(header.service, header.subtype).ok_or(
            WireError::UnrecognizedType { service: header.service, subtype: header.subtype },
        )?;

        let body = buf.get(..declared).ok_or(WireError::Truncated)?;
        let mut ctx = SerialCtx::reading(body, HEADER_LEN, flags);
        item.wire_fields(&mut ctx)?;

        let consumed = ctx.position();
        if consumed != declared {
            return Err(WireError::LengthMismatch { declared, consumed });
        }
        Ok((item, declared))
    }
}

/// Reads a buffer of concatenated packets front to back.
///
/// Unrecognized item types are skipped over by their declared length so
/// the packets after them stay decodable; structural failures (truncation,
/// tag or length mismatches) stop iteration, since the stream position
/// can no longer be trusted.
pub struct StreamReader<'a> {
    registry: &'a Registry,
    buf: &'a [u8],
    offset: usize,
    next_id: u64,
    flags: SerialFlags,
}

impl<'a> StreamReader<'a> {
    pub fn new(registry: &'a Registry, buf: &'a [u8], flags: SerialFlags) -> Self {
        Self { registry, buf, offset: 0, next_id: 1, flags }
    }

    /// Byte offset of the next undecoded packet.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Decode the next recognized item, or `Ok(None)` at end of buffer.
    pub fn next_item(&mut self) -> Result<Option<(PacketId, Box<dyn Item>)>> {
        loop {
            let rest = self.buf.get(self.offset..).unwrap_or(&[]);
            if rest.is_empty() {
                return Ok(None);
            }

            match self.registry.deserialize(rest, self.flags) {
                Ok((item, used)) => {
                    self.offset += used;
                    let id = PacketId(self.next_id);
                    self.next_id += 1;
                    return Ok(Some((id, item)));
                }
                Err(WireError::UnrecognizedType { service, subtype }) => {
                    // deserialize only reports this after validating the
                    // declared length fits `rest`, so skipping is safe.
                    let header = ItemHeader::read(rest)?;
                    tracing::warn!(
                        service,
                        subtype,
                        length = header.length,
                        "skipping unrecognized item"
                    );
                    self.offset += header.length as usize;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
