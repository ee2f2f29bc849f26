//! 8-byte packet header: version, service id, subtype, total length.
//!
//! The header identifies and routes a packet before its body is decoded;
//! `length` always equals the bytes the whole packet occupies, header
//! included. That invariant is enforced after every encode and checked
//! after every decode.

use crate::error::Result;
use crate::wire::base;

/// Encoded header length in bytes.
pub const HEADER_LEN: usize = 8;

/// Header version byte for service items.
pub const VERSION_SERVICE: u8 = 0x02;

/// Decoded packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHeader {
    pub version: u8,
    pub service: u16,
    pub subtype: u8,
    /// Total packet length, these 8 bytes included.
    pub length: u32,
}

impl ItemHeader {
    /// Write the header at the cursor.
    pub fn write(&self, buf: &mut [u8], offset: &mut usize) -> Result<()> {
        let mut cur = *offset;
        base::write_u8(buf, &mut cur, self.version)?;
        base::write_u16(buf, &mut cur, self.service)?;
        base::write_u8(buf, &mut cur, self.subtype)?;
        base::write_u32(buf, &mut cur, self.length)?;
        *offset = cur;
        Ok(())
    }

    /// Read a header from the front of `buf`. Fails `Truncated` for
    /// anything shorter than [`HEADER_LEN`].
    pub fn read(buf: &[u8]) -> Result<Self> {
        let mut offset = 0;
        let version = base::read_u8(buf, &mut offset)?;
        let service = base::read_u16(buf, &mut offset)?;
        let subtype = base::read_u8(buf, &mut offset)?;
        let length = base::read_u32(buf, &mut offset)?;
        Ok(Self { version, service, subtype, length })
    }

    /// Packed 32-bit type word: `version << 24 | service << 8 | subtype`.
    /// Useful for logging and type comparisons.
    pub fn type_word(&self) -> u32 {
        (u32::from(self.version) << 24) | (u32::from(self.service) << 8) | u32::from(self.subtype)
    }
}
