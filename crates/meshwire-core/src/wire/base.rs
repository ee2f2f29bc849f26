//! Fixed-width integer codec (big-endian, bounds-checked).
//!
//! Parsing rules shared with the layers above:
//! - Never index (`buf[0]`) — every access goes through `slice::get`.
//! - A failed read or write leaves the cursor untouched.
//!
//! No other module encodes multi-byte scalars directly; the size pass,
//! write pass, and read pass all funnel through these functions.

use crate::error::{Result, WireError};

fn read_array<const N: usize>(buf: &[u8], offset: &mut usize) -> Result<[u8; N]> {
    let end = offset.checked_add(N).ok_or(WireError::Truncated)?;
    let src = buf.get(*offset..end).ok_or(WireError::Truncated)?;
    let mut out = [0u8; N];
    out.copy_from_slice(src);
    *offset = end;
    Ok(out)
}

fn write_array(buf: &mut [u8], offset: &mut usize, src: &[u8]) -> Result<()> {
    let end = offset
        .checked_add(src.len())
        .ok_or(WireError::InsufficientCapacity { required: usize::MAX })?;
    let dst = buf
        .get_mut(*offset..end)
        .ok_or(WireError::InsufficientCapacity { required: end })?;
    dst.copy_from_slice(src);
    *offset = end;
    Ok(())
}

/// Read one byte at the cursor.
pub fn read_u8(buf: &[u8], offset: &mut usize) -> Result<u8> {
    Ok(u8::from_be_bytes(read_array::<1>(buf, offset)?))
}

/// Read a big-endian u16 at the cursor.
pub fn read_u16(buf: &[u8], offset: &mut usize) -> Result<u16> {
    Ok(u16::from_be_bytes(read_array::<2>(buf, offset)?))
}

/// Read a big-endian u32 at the cursor.
pub fn read_u32(buf: &[u8], offset: &mut usize) -> Result<u32> {
    Ok(u32::from_be_bytes(read_array::<4>(buf, offset)?))
}

/// Read a big-endian u64 at the cursor.
pub fn read_u64(buf: &[u8], offset: &mut usize) -> Result<u64> {
    Ok(u64::from_be_bytes(read_array::<8>(buf, offset)?))
}

/// Write one byte at the cursor.
pub fn write_u8(buf: &mut [u8], offset: &mut usize, v: u8) -> Result<()> {
    write_array(buf, offset, &v.to_be_bytes())
}

/// Write a big-endian u16 at the cursor.
pub fn write_u16(buf: &mut [u8], offset: &mut usize, v: u16) -> Result<()> {
    write_array(buf, offset, &v.to_be_bytes())
}

/// Write a big-endian u32 at the cursor.
pub fn write_u32(buf: &mut [u8], offset: &mut usize, v: u32) -> Result<()> {
    write_array(buf, offset, &v.to_be_bytes())
}

/// Write a big-endian u64 at the cursor.
pub fn write_u64(buf: &mut [u8], offset: &mut usize, v: u64) -> Result<()> {
    write_array(buf, offset, &v.to_be_bytes())
}

/// Read `len` raw bytes at the cursor. Used by the TLV layer for payloads;
/// multi-byte scalars never go through here.
pub fn read_slice<'a>(buf: &'a [u8], offset: &mut usize, len: usize) -> Result<&'a [u8]> {
    let end = offset.checked_add(len).ok_or(WireError::Truncated)?;
    let src = buf.get(*offset..end).ok_or(WireError::Truncated)?;
    *offset = end;
    Ok(src)
}

/// Write raw bytes at the cursor. Same caveat as `read_slice`.
pub fn write_slice(buf: &mut [u8], offset: &mut usize, src: &[u8]) -> Result<()> {
    write_array(buf, offset, src)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn u32_is_big_endian() {
        let mut buf = [0u8; 4];
        let mut off = 0;
        write_u32(&mut buf, &mut off, 0x0102_0304).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(off, 4);
    }

    #[test]
    fn read_past_end_leaves_cursor() {
        let buf = [0u8; 3];
        let mut off = 1;
        assert!(matches!(
            read_u32(&buf, &mut off),
            Err(WireError::Truncated)
        ));
        assert_eq!(off, 1);
    }

    #[test]
    fn write_past_end_leaves_cursor() {
        let mut buf = [0u8; 5];
        let mut off = 2;
        let err = write_u64(&mut buf, &mut off, 7).unwrap_err();
        assert!(matches!(err, WireError::InsufficientCapacity { required: 10 }));
        assert_eq!(off, 2);
        assert_eq!(buf, [0u8; 5]);
    }

    #[test]
    fn sequential_cursor_advance() {
        let mut buf = [0u8; 15];
        let mut off = 0;
        write_u8(&mut buf, &mut off, 0xAB).unwrap();
        write_u16(&mut buf, &mut off, 0xCDEF).unwrap();
        write_u64(&mut buf, &mut off, u64::MAX).unwrap();
        write_u32(&mut buf, &mut off, 0).unwrap();
        assert_eq!(off, 15);

        let mut rd = 0;
        assert_eq!(read_u8(&buf, &mut rd).unwrap(), 0xAB);
        assert_eq!(read_u16(&buf, &mut rd).unwrap(), 0xCDEF);
        assert_eq!(read_u64(&buf, &mut rd).unwrap(), u64::MAX);
        assert_eq!(read_u32(&buf, &mut rd).unwrap(), 0);
        assert_eq!(rd, off);
    }
}
