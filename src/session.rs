// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The per-connection cryptographic context (spec §3 "Session"): derived
//! keys, the read/write/pending epoch triangle, sequence counters, and
//! the handshake transcript.
//!
//! Modeled on the epoch-bundle shape of `s2n-quic-core::crypto::CryptoSuite`
//! (a suite pairs a read key with a write key per epoch) generalized to
//! classic TLS's explicit `change_cipher_spec` signal, which switches each
//! direction independently rather than in lockstep.

use crate::crypto_provider::{CryptoProvider, Decrypt, Encrypt};
use crate::error::TlsError;
use crate::prf;
use crate::role::Role;
use crate::suite::{BulkCipherSpec, MacAlgorithm, SuiteInfo};
use alloc::boxed::Box;
use alloc::vec::Vec;
use zeroize::Zeroizing;

/// Keys and cipher state active for reading (decrypting) inbound records.
pub struct ReadState {
    pub mac_key: Zeroizing<Vec<u8>>,
    pub mac_algorithm: MacAlgorithm,
    pub bulk: BulkCipherSpec,
    pub cipher: Box<dyn Decrypt>,
    pub seq: u64,
}

/// Keys and cipher state active for writing (encrypting) outbound records.
pub struct WriteState {
    pub mac_key: Zeroizing<Vec<u8>>,
    pub mac_algorithm: MacAlgorithm,
    pub bulk: BulkCipherSpec,
    pub cipher: Box<dyn Encrypt>,
    pub seq: u64,
}

pub struct Session {
    pub role: Role,
    provider: Box<dyn CryptoProvider>,
    pub suite: Option<SuiteInfo>,

    pub client_random: [u8; 32],
    pub server_random: [u8; 32],
    pre_master_secret: Zeroizing<Vec<u8>>,
    pub master_secret: Zeroizing<Vec<u8>>,

    /// The concatenation of every handshake message's raw bytes seen or
    /// sent so far, in order, excluding `hello_request` (spec §3). Hashed
    /// from scratch with the negotiated PRF hash whenever a transcript
    /// digest is needed; simpler than maintaining an incremental hash
    /// state across a suite negotiation whose hash algorithm isn't known
    /// until `server_hello`.
    transcript: Vec<u8>,
    recording: bool,

    read: Option<ReadState>,
    write: Option<WriteState>,
    /// Keys derived but not yet activated on either side. `change_cipher_spec`
    /// switches read and write independently, so each half is held ready
    /// until that direction's `change_cipher_spec` actually arrives/is
    /// sent, then moved into `read`/`write` and cleared here (spec §3
    /// "collapse-and-reallocate").
    pending_write: Option<WriteState>,
    pending_read: Option<ReadState>,
}

impl Session {
    pub fn new(role: Role, provider: Box<dyn CryptoProvider>) -> Self {
        Self {
            role,
            provider,
            suite: None,
            client_random: [0; 32],
            server_random: [0; 32],
            pre_master_secret: Zeroizing::new(Vec::new()),
            master_secret: Zeroizing::new(Vec::new()),
            transcript: Vec::new(),
            recording: true,
            read: None,
            write: None,
            pending_write: None,
            pending_read: None,
        }
    }

    /// A session with a provider that panics on any crypto operation, for
    /// tests that only exercise plaintext framing.
    #[cfg(any(test, feature = "testing"))]
    pub fn null() -> Self {
        Self::new(Role::Client, Box::new(crate::testing::NullProvider))
    }

    pub fn provider(&self) -> &dyn CryptoProvider {
        self.provider.as_ref()
    }

    pub fn should_decrypt(&self) -> bool {
        self.read.is_some()
    }

    pub fn should_encrypt(&self) -> bool {
        self.write.is_some()
    }

    pub fn read_state(&mut self) -> Option<&mut ReadState> {
        self.read.as_mut()
    }

    pub fn write_state(&mut self) -> Option<&mut WriteState> {
        self.write.as_mut()
    }

    /// Borrows the provider alongside the active write state. A plain
    /// `self.provider()` + `self.write_state()` pair would borrow `self`
    /// twice; splitting on the concrete fields here lets the borrow
    /// checker see they don't overlap.
    pub fn provider_and_write(&mut self) -> Option<(&dyn CryptoProvider, &mut WriteState)> {
        let write = self.write.as_mut()?;
        Some((self.provider.as_ref(), write))
    }

    /// Borrows the provider alongside the active read state; see
    /// [`Session::provider_and_write`].
    pub fn provider_and_read(&mut self) -> Option<(&dyn CryptoProvider, &mut ReadState)> {
        let read = self.read.as_mut()?;
        Some((self.provider.as_ref(), read))
    }

    /// Appends a handshake message's raw bytes to the transcript, unless
    /// recording has been stopped (spec §3: `hello_request` is excluded by
    /// the caller never passing it here; see `parser::drain_handshake_messages`).
    pub fn record_transcript(&mut self, raw_message: &[u8]) {
        if self.recording {
            self.transcript.extend_from_slice(raw_message);
        }
    }

    /// Stops transcript accumulation. Called once both `finished` messages
    /// have been processed, since this core does not support renegotiation
    /// (spec §9) and has no further use for the transcript afterward.
    pub fn stop_recording(&mut self) {
        self.recording = false;
    }

    /// Hashes the transcript so far with the negotiated suite's PRF hash.
    pub fn transcript_hash(&self) -> Result<Vec<u8>, TlsError> {
        let suite = self.suite.ok_or(TlsError::InternalError)?;
        let mut hash = self.provider.hash(suite.prf);
        hash.update(&self.transcript);
        Ok(hash.finish())
    }

    /// Derives `master_secret` from `pre_master_secret` (must already be
    /// set via [`Session::set_pre_master_secret`]) and both hello randoms,
    /// then expands and splits the key block into the pending read/write
    /// states, ready to activate on the next `change_cipher_spec` in each
    /// direction.
    pub fn derive_keys(&mut self) -> Result<(), TlsError> {
        let suite = self.suite.ok_or(TlsError::InternalError)?;

        let master_secret = prf::master_secret(
            self.provider.as_ref(),
            suite.prf,
            &self.pre_master_secret,
            &self.client_random,
            &self.server_random,
        )?;
        self.master_secret = Zeroizing::new(master_secret.to_vec());

        let block = prf::key_block(
            self.provider.as_ref(),
            suite.prf,
            &self.master_secret,
            &self.client_random,
            &self.server_random,
            suite.mac.mac_key_len(),
            suite.bulk.key_len,
            suite.bulk.iv_len,
        )?;

        let (own_write_key, own_write_mac, own_write_iv, peer_write_key, peer_write_mac, peer_write_iv) =
            match self.role {
                Role::Client => (
                    block.client_write_key,
                    block.client_write_mac_key,
                    block.client_write_iv,
                    block.server_write_key,
                    block.server_write_mac_key,
                    block.server_write_iv,
                ),
                Role::Server => (
                    block.server_write_key,
                    block.server_write_mac_key,
                    block.server_write_iv,
                    block.client_write_key,
                    block.client_write_mac_key,
                    block.client_write_iv,
                ),
            };

        let encrypt = self.provider.cipher(suite.bulk, &own_write_key, &own_write_iv)?;
        let decrypt = self.provider.decipher(suite.bulk, &peer_write_key, &peer_write_iv)?;

        self.pending_write = Some(WriteState {
            mac_key: Zeroizing::new(own_write_mac),
            mac_algorithm: suite.mac,
            bulk: suite.bulk,
            cipher: encrypt,
            seq: 0,
        });
        self.pending_read = Some(ReadState {
            mac_key: Zeroizing::new(peer_write_mac),
            mac_algorithm: suite.mac,
            bulk: suite.bulk,
            cipher: decrypt,
            seq: 0,
        });
        Ok(())
    }

    pub fn set_pre_master_secret(&mut self, secret: Vec<u8>) {
        self.pre_master_secret = Zeroizing::new(secret);
    }

    /// Activates the pending write epoch. Called when we send our own
    /// `change_cipher_spec`.
    pub fn switch_write(&mut self) -> Result<(), TlsError> {
        self.write = Some(self.pending_write.take().ok_or(TlsError::UnexpectedMessage)?);
        Ok(())
    }

    /// Activates the pending read epoch. Called when we receive the
    /// peer's `change_cipher_spec`.
    pub fn switch_read(&mut self) -> Result<(), TlsError> {
        self.read = Some(self.pending_read.take().ok_or(TlsError::UnexpectedMessage)?);
        Ok(())
    }
}
