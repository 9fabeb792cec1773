//! Length-exact framing over a full-duplex byte conduit.
//!
//! The exchange runs a fixed schedule of messages; each helper reads or
//! writes exactly one of them. Reads use `read_exact` semantics
//! throughout: a short read is a channel failure, never a silently
//! truncated message. Writes flush before the caller blocks on its next
//! read, so the peer always observes a complete message.

use std::io::{Read, Write};

use crate::error::Result;
use crate::math::poly::{Ring, RnsPoly};
use crate::params::{ID_LEN, KEY_LEN};

/// Write a 16-byte party identifier.
pub fn write_id<C: Write>(conduit: &mut C, id: &[u8; ID_LEN]) -> Result<()> {
    conduit.write_all(id)?;
    conduit.flush()?;
    Ok(())
}

/// Read a 16-byte party identifier.
pub fn read_id<C: Read>(conduit: &mut C) -> Result<[u8; ID_LEN]> {
    let mut id = [0u8; ID_LEN];
    conduit.read_exact(&mut id)?;
    Ok(id)
}

/// Write a 32-byte confirmation tag.
pub fn write_tag<C: Write>(conduit: &mut C, tag: &[u8; KEY_LEN]) -> Result<()> {
    conduit.write_all(tag)?;
    conduit.flush()?;
    Ok(())
}

/// Read a 32-byte confirmation tag.
pub fn read_tag<C: Read>(conduit: &mut C) -> Result<[u8; KEY_LEN]> {
    let mut tag = [0u8; KEY_LEN];
    conduit.read_exact(&mut tag)?;
    Ok(tag)
}

/// Write one polynomial in the canonical wire layout.
pub fn write_poly<C: Write>(conduit: &mut C, poly: &RnsPoly) -> Result<()> {
    poly.write_to(conduit)?;
    conduit.flush()?;
    Ok(())
}

/// Read one polynomial, validated against `ring`.
pub fn read_poly<C: Read>(ring: &Ring, conduit: &mut C) -> Result<RnsPoly> {
    RnsPoly::read_from(ring, conduit)
}
