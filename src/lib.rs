// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Record/handshake framing codec and handshake state machine for
//! TLS 1.0-1.2 (RFC 5246 and its predecessors).
//!
//! This crate implements the framing and orchestration layers of a TLS
//! endpoint: record-layer envelopes, handshake message reassembly, the
//! role-parameterized handshake state machine, and the per-epoch session
//! cryptographic context (key derivation, MAC sequencing, record AEAD-style
//! encrypt/decrypt for CBC and stream ciphers). Certificate chain
//! validation, the raw transport, and the low-level cryptographic
//! primitives themselves are external collaborators (see [`crypto_provider`]
//! and [`certs`]).

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod certs;
pub mod config;
pub mod content_type;
pub mod crypto_provider;
pub mod error;
pub mod events;
pub mod frame;
pub mod framer;
pub mod handshake;
pub mod parser;
pub mod prf;
pub mod record;
pub mod record_crypt;
pub mod role;
pub mod session;
pub mod state_machine;
pub mod suite;
pub mod version;

#[cfg(feature = "default-provider")]
pub mod default_provider;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::TlsError;
pub use role::Role;
pub use version::ProtocolVersion;
