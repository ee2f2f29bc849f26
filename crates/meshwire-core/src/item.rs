//! Item abstraction and the serialize entry points.

use std::any::Any;
use std::fmt;

use crate::error::{Result, WireError};
use crate::wire::header::{ItemHeader, HEADER_LEN, VERSION_SERVICE};
use crate::wire::process::{SerialCtx, SerialFlags, WireFields};

/// Transient correlation handle attached to decoded items by the stream
/// reader. Never written to the wire and never part of item equality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PacketId(pub u64);

/// One concrete packet variant.
///
/// `wire_fields` (from [`WireFields`]) is the single layout declaration;
/// `service`/`subtype` identify the variant on the wire. Items are plain
/// caller-owned values: the codec never retains one, and the caller must
/// not mutate an item concurrently with a serialize call on it.
pub trait Item: WireFields + fmt::Debug + Send {
    /// Service id namespace the item belongs to.
    fn service(&self) -> u16;

    /// Variant discriminator within the service.
    fn subtype(&self) -> u8;

    /// Header version byte. Item families on the current format keep the
    /// default.
    fn version(&self) -> u8 {
        VERSION_SERVICE
    }

    /// Downcast support for items produced by a registry.
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Total encoded size of `item` under `flags`, header included.
pub fn size_of<I: Item + ?Sized>(item: &mut I, flags: SerialFlags) -> Result<usize> {
    let mut ctx = SerialCtx::sizing(flags);
    item.wire_fields(&mut ctx)?;
    Ok(HEADER_LEN + ctx.position())
}

/// Encode `item` into the front of `buf`, returning the bytes written.
///
/// Fails with `InsufficientCapacity { required }` before touching the
/// buffer when `buf` is too small; the caller can resize to `required`
/// and retry. The written header's length equals the returned byte count
/// by construction, verified before returning.
pub fn serialize<I: Item + ?Sized>(
    item: &mut I,
    buf: &mut [u8],
    flags: SerialFlags,
) -> Result<usize> {
    let total = size_of(item, flags)?;
    let length =
        u32::try_from(total).map_err(|_| WireError::PayloadTooLarge { size: total })?;
    if buf.len() < total {
        return Err(WireError::InsufficientCapacity { required: total });
    }

    let header = ItemHeader {
        version: item.version(),
        service: item.service(),
        subtype: item.subtype(),
        length,
    };
    let mut offset = 0;
    header.write(buf, &mut offset)?;

    let mut ctx = SerialCtx::writing(buf, offset, flags);
    item.wire_fields(&mut ctx)?;
    let written = ctx.position();
    if written != total {
        // a size/write divergence is a field-declaration defect
        return Err(WireError::LengthMismatch { declared: total, consumed: written });
    }
    Ok(total)
}

/// Encode `item` into a freshly allocated buffer of exactly the right size.
pub fn serialize_to_vec<I: Item + ?Sized>(item: &mut I, flags: SerialFlags) -> Result<Vec<u8>> {
    let total = size_of(item, flags)?;
    let mut buf = vec![0u8; total];
    serialize(item, &mut buf, flags)?;
    Ok(buf)
}
