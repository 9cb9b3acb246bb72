// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol version negotiation.
//!
//! Each side writes `MAGIC` and the highest version it speaks, then reads
//! the peer's. Both settle on the lower of the two, so fields appended in
//! newer versions are only sent to peers that read them.

use std::io::{Read, Write};

use bw_wire::MIN_PROTOCOL_VERSION;
use tracing::debug;

use crate::error::HandshakeError;

pub const MAGIC: [u8; 4] = *b"BWEV";

/// Exchange versions and return the one both sides will use.
pub fn negotiate<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    local_version: i32,
) -> Result<i32, HandshakeError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&local_version.to_le_bytes())?;
    writer.flush()?;

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(HandshakeError::BadMagic(magic));
    }
    let mut version = [0u8; 4];
    reader.read_exact(&mut version)?;
    let peer_version = i32::from_le_bytes(version);
    if peer_version < MIN_PROTOCOL_VERSION {
        return Err(HandshakeError::UnsupportedVersion(peer_version));
    }

    let version = local_version.min(peer_version);
    debug!(local_version, peer_version, version, "protocol version negotiated");
    Ok(version)
}

#[cfg(test)]
#[path = "handshake_tests.rs"]
mod tests;
