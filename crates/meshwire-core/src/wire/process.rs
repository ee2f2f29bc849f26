//! The three-pass field processor.
//!
//! Every item declares its wire layout exactly once, as an ordered list of
//! field calls inside [`WireFields::wire_fields`]. The same list drives the
//! size pass, the write pass, and the read pass, so the size computation can
//! structurally never disagree with what is actually written or read. This
//! is the load-bearing correctness property of the whole codec: a
//! size-then-allocate-then-write sequence cannot corrupt a buffer.
//!
//! Conditional fields must gate on [`SerialCtx::flags`] through one shared
//! predicate so every pass evaluates the same condition against the same
//! state.

use bytes::Bytes;

use crate::error::{Result, WireError};
use crate::wire::{base, tlv};

/// Serializer format flags, shared by all three passes of one call.
///
/// The core treats these as opaque; item families define the bit meanings.
pub type SerialFlags = u32;

/// A value whose wire layout is declared once and driven through all three
/// passes by a [`SerialCtx`].
///
/// Implemented by full items and by composable field groups that items
/// splice into their own layouts.
pub trait WireFields {
    fn wire_fields(&mut self, ctx: &mut SerialCtx<'_>) -> Result<()>;
}

enum Pass<'a> {
    /// Accumulates encoded width; performs no I/O.
    Size { total: usize },
    /// Encodes field values into the buffer at the cursor.
    Write { buf: &'a mut [u8], offset: usize },
    /// Decodes from the buffer at the cursor into the fields.
    Read { buf: &'a [u8], offset: usize },
}

/// One serialize/deserialize pass over an item's declared fields.
///
/// A context is created per call and never shared across calls. In read
/// mode the buffer is pre-sliced to the packet's declared length, so no
/// field can pull bytes from a following packet.
pub struct SerialCtx<'a> {
    pass: Pass<'a>,
    flags: SerialFlags,
}

impl<'a> SerialCtx<'a> {
    /// Size-accumulation pass.
    pub fn sizing(flags: SerialFlags) -> Self {
        Self { pass: Pass::Size { total: 0 }, flags }
    }

    /// Write pass starting at `offset` (normally just past the header).
    pub fn writing(buf: &'a mut [u8], offset: usize, flags: SerialFlags) -> Self {
        Self { pass: Pass::Write { buf, offset }, flags }
    }

    /// Read pass starting at `offset` over a buffer already limited to the
    /// packet's declared length.
    pub fn reading(buf: &'a [u8], offset: usize, flags: SerialFlags) -> Self {
        Self { pass: Pass::Read { buf, offset }, flags }
    }

    /// Format flags for this call. Conditional field predicates consult
    /// these; the value is identical in all passes of one item.
    pub fn flags(&self) -> SerialFlags {
        self.flags
    }

    /// Bytes accumulated by a size pass, or the current cursor otherwise.
    pub fn position(&self) -> usize {
        match &self.pass {
            Pass::Size { total } => *total,
            Pass::Write { offset, .. } => *offset,
            Pass::Read { offset, .. } => *offset,
        }
    }

    /// Fixed-width u8 field.
    pub fn u8_field(&mut self, v: &mut u8, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += 1;
                Ok(())
            }
            Pass::Write { buf, offset } => base::write_u8(buf, offset, *v),
            Pass::Read { buf, offset } => {
                *v = base::read_u8(buf, offset)?;
                Ok(())
            }
        }
    }

    /// Fixed-width u16 field.
    pub fn u16_field(&mut self, v: &mut u16, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += 2;
                Ok(())
            }
            Pass::Write { buf, offset } => base::write_u16(buf, offset, *v),
            Pass::Read { buf, offset } => {
                *v = base::read_u16(buf, offset)?;
                Ok(())
            }
        }
    }

    /// Fixed-width u32 field.
    pub fn u32_field(&mut self, v: &mut u32, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += 4;
                Ok(())
            }
            Pass::Write { buf, offset } => base::write_u32(buf, offset, *v),
            Pass::Read { buf, offset } => {
                *v = base::read_u32(buf, offset)?;
                Ok(())
            }
        }
    }

    /// Fixed-width u64 field.
    pub fn u64_field(&mut self, v: &mut u64, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += 8;
                Ok(())
            }
            Pass::Write { buf, offset } => base::write_u64(buf, offset, *v),
            Pass::Read { buf, offset } => {
                *v = base::read_u64(buf, offset)?;
                Ok(())
            }
        }
    }

    /// TLV UTF-8 string field (raw bytes, no terminator).
    pub fn str_field(&mut self, tag: u16, v: &mut String, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += tlv::tlv_len(v.len());
                Ok(())
            }
            Pass::Write { buf, offset } => tlv::write_tlv(buf, offset, tag, v.as_bytes()),
            Pass::Read { buf, offset } => {
                let payload = tlv::read_tlv(buf, offset, tag)?;
                *v = std::str::from_utf8(payload)
                    .map_err(|_| WireError::BadUtf8)?
                    .to_owned();
                Ok(())
            }
        }
    }

    /// TLV opaque binary field. The decoded bytes are owned by the item.
    pub fn blob_field(&mut self, tag: u16, v: &mut Bytes, _name: &'static str) -> Result<()> {
        match &mut self.pass {
            Pass::Size { total } => {
                *total += tlv::tlv_len(v.len());
                Ok(())
            }
            Pass::Write { buf, offset } => tlv::write_tlv(buf, offset, tag, v),
            Pass::Read { buf, offset } => {
                let payload = tlv::read_tlv(buf, offset, tag)?;
                *v = Bytes::copy_from_slice(payload);
                Ok(())
            }
        }
    }

    /// Ordered sequence field: a TLV-wrapped u32 element count followed by
    /// that many concatenated sub-records, each driven recursively through
    /// this context.
    pub fn seq_field<T>(&mut self, items: &mut Vec<T>, _name: &'static str) -> Result<()>
    where
        T: WireFields + Default,
    {
        let read_count = match &mut self.pass {
            Pass::Size { total } => {
                *total += tlv::tlv_len(4);
                None
            }
            Pass::Write { buf, offset } => {
                let count = u32::try_from(items.len())
                    .map_err(|_| WireError::PayloadTooLarge { size: items.len() })?;
                tlv::write_tlv(buf, offset, tlv::tag::SEQ_COUNT, &count.to_be_bytes())?;
                None
            }
            Pass::Read { buf, offset } => {
                let payload = tlv::read_tlv(buf, offset, tlv::tag::SEQ_COUNT)?;
                let raw: [u8; 4] = payload.try_into().map_err(|_| WireError::LengthMismatch {
                    declared: payload.len(),
                    consumed: 4,
                })?;
                Some(u32::from_be_bytes(raw))
            }
        };

        match read_count {
            None => {
                for item in items.iter_mut() {
                    item.wire_fields(self)?;
                }
            }
            Some(count) => {
                // count is attacker controlled; never preallocate from it
                let mut decoded = Vec::new();
                for _ in 0..count {
                    let mut item = T::default();
                    item.wire_fields(self)?;
                    decoded.push(item);
                }
                *items = decoded;
            }
        }
        Ok(())
    }
}
