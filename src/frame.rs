// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Parser output: a tagged frame carrying the content type plus, for
//! handshakes, the handshake type, typed body, and the exact raw bytes so
//! the state machine can feed them into the transcript (spec §3 "Frame").

use crate::error::AlertDescription;
use crate::handshake::HandshakeBody;
use crate::version::ProtocolVersion;
use alloc::vec::Vec;

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    ChangeCipherSpec,
    Alert {
        level: crate::error::AlertLevel,
        description: AlertDescription,
    },
    Handshake {
        body: HandshakeBody,
        /// `[type || length || body]`, exactly as it appeared on the wire
        /// (or as framed for outbound messages) — the transcript unit.
        raw_body: Vec<u8>,
    },
    /// `client_key_exchange` / `server_key_exchange`: parsing these
    /// requires the negotiated suite, which only the state machine knows,
    /// so the parser hands back the undecoded body alongside the raw bytes
    /// and the caller finishes decoding via `handshake::key_exchange`.
    KeyExchangeRaw {
        handshake_type: crate::handshake::HandshakeType,
        body: Vec<u8>,
        raw_body: Vec<u8>,
    },
    ApplicationData(Vec<u8>),
}

/// A frame paired with the record-layer version it arrived under, so the
/// state machine can enforce spec §3's post-hello version-pinning
/// invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedFrame {
    pub frame: Frame,
    pub record_version: ProtocolVersion,
}
