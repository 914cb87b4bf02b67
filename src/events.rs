// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The state machine's typed outbox (spec §9 REDESIGN FLAGS: "replace the
//! original's ad hoc event callbacks with a single typed enum the caller
//! drains"). Every side-effect the handshake produces — bytes to emit,
//! entropy consumed, state transitions, the moment the connection becomes
//! secure, peer certificates, and fatal errors — is one of these, returned
//! in order from the operation that produced it rather than delivered
//! through a callback.

use crate::error::TlsError;
use crate::handshake::Certificate;
use alloc::vec::Vec;

/// A coarse phase of the handshake, useful for logging and for callers
/// that only care about high-level progress rather than every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Start,
    HelloExchanged,
    KeyExchange,
    WaitFinished,
    Established,
    Closed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Bytes to write to the transport. Emitted once per outbound record.
    Output(Vec<u8>),
    /// Random bytes consumed from the crypto provider (spec §3: "side
    /// signal" alongside `HandshakeMessage`, useful for test vectors that
    /// want to observe the exact entropy a handshake drew).
    Random(Vec<u8>),
    /// A handshake message was sent or received, tagged with its raw bytes
    /// as they entered the transcript.
    HandshakeMessage(Vec<u8>),
    /// The peer's certificate chain, as soon as the state machine parses
    /// it (before any leaf-selection or validation, which are the
    /// `certs` collaborator's job).
    PeerCertificate(Certificate),
    StateChange(ConnectionState),
    /// Both `finished` messages have been verified; the session is ready
    /// to carry `application_data`.
    Secure,
    /// A decrypted `application_data` record, handed to the caller in
    /// arrival order. Only produced once [`Event::Secure`] has fired; an
    /// `application_data` record received any earlier is a protocol error
    /// (spec §2 "While `secure = false`, `application_data` frames are
    /// rejected").
    ApplicationData(Vec<u8>),
    /// A non-fatal (warning-level) alert was received and is being
    /// ignored except for `close_notify`, which this event precedes a
    /// `StateChange(Closed)` for (SPEC_FULL.md §3).
    Warning(crate::error::AlertDescription),
    Error(TlsError),
}
