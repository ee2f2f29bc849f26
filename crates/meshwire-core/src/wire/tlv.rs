//! Type-Length-Value codec for variable-size fields.
//!
//! Wire shape: `tag:u16, len:u32, payload:len bytes`, big-endian, with
//! `len` counting the payload only. A TLV whose declared length exceeds
//! the remaining buffer is invalid; decoding fails without advancing the
//! cursor or touching the target field.

use crate::error::{Result, WireError};
use crate::wire::base;

/// Byte overhead of one TLV envelope (tag + length).
pub const TLV_OVERHEAD: usize = 6;

/// Tag namespace for TLV fields used by item payloads.
///
/// Values are part of the wire format; never renumber a released tag.
pub mod tag {
    /// Display names (nicknames, lobby names, topics).
    pub const STR_NAME: u16 = 0x0051;
    /// Peer identifiers.
    pub const STR_PEER_ID: u16 = 0x0052;
    /// Key half of a key/value pair.
    pub const STR_KEY: u16 = 0x0053;
    /// Value half of a key/value pair.
    pub const STR_VALUE: u16 = 0x0054;
    /// Chat and status message bodies.
    pub const STR_MSG: u16 = 0x0060;
    /// Opaque signature blob.
    pub const BIN_SIGN: u16 = 0x0070;
    /// Avatar image bytes.
    pub const BIN_IMAGE: u16 = 0x0130;
    /// Element count prefixing a sequence of sub-records.
    pub const SEQ_COUNT: u16 = 0x0005;
}

/// Encoded size of a TLV holding `payload_len` payload bytes.
pub const fn tlv_len(payload_len: usize) -> usize {
    TLV_OVERHEAD + payload_len
}

/// Write one TLV at the cursor.
///
/// Atomic: capacity for the whole TLV is checked up front, so a failed
/// write leaves the cursor unchanged and no partial envelope behind it.
pub fn write_tlv(buf: &mut [u8], offset: &mut usize, tag: u16, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len())
        .map_err(|_| WireError::PayloadTooLarge { size: payload.len() })?;
    let required = offset
        .checked_add(tlv_len(payload.len()))
        .ok_or(WireError::InsufficientCapacity { required: usize::MAX })?;
    if required > buf.len() {
        return Err(WireError::InsufficientCapacity { required });
    }

    let mut cur = *offset;
    base::write_u16(buf, &mut cur, tag)?;
    base::write_u32(buf, &mut cur, len)?;
    base::write_slice(buf, &mut cur, payload)?;
    *offset = cur;
    Ok(())
}

/// Read one TLV at the cursor, returning its payload.
///
/// The cursor does not advance on failure: a tag mismatch reports
/// `TagMismatch` (corrupt or misaligned stream), and a declared length
/// running past the buffer reports `Truncated`.
pub fn read_tlv<'a>(buf: &'a [u8], offset: &mut usize, expected: u16) -> Result<&'a [u8]> {
    let mut cur = *offset;
    let found = base::read_u16(buf, &mut cur)?;
    if found != expected {
        return Err(WireError::TagMismatch { expected, found });
    }
    let len = base::read_u32(buf, &mut cur)? as usize;
    let payload = base::read_slice(buf, &mut cur, len)?;
    *offset = cur;
    Ok(payload)
}
