// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Test-only scaffolding: an in-memory duplex byte pipe standing in for
//! the transport collaborator, and a [`NullProvider`] for tests that only
//! exercise plaintext framing and never touch real cryptography.

use crate::crypto_provider::{CryptoProvider, Decrypt, Encrypt, EcdhePrivateKey, Hash, Mac, VerifyKey};
use crate::error::TlsError;
use crate::suite::{BulkCipherSpec, MacAlgorithm, PrfHash};
use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// An in-memory duplex byte stream. `Pipe::pair()` returns two ends; bytes
/// written to one are read from the other, mirroring the abstract
/// transport collaborator the spec treats as out of scope (spec §6).
#[derive(Default)]
pub struct Pipe {
    inbox: VecDeque<u8>,
}

impl Pipe {
    pub fn pair() -> (PipeEnd, PipeEnd) {
        let a = alloc::rc::Rc::new(core::cell::RefCell::new(Pipe::default()));
        let b = alloc::rc::Rc::new(core::cell::RefCell::new(Pipe::default()));
        (
            PipeEnd {
                outbox: a.clone(),
                inbox: b.clone(),
            },
            PipeEnd {
                outbox: b,
                inbox: a,
            },
        )
    }
}

pub struct PipeEnd {
    outbox: alloc::rc::Rc<core::cell::RefCell<Pipe>>,
    inbox: alloc::rc::Rc<core::cell::RefCell<Pipe>>,
}

impl PipeEnd {
    pub fn send(&self, bytes: &[u8]) {
        self.outbox.borrow_mut().inbox.extend(bytes.iter().copied());
    }

    pub fn recv_all(&self) -> Vec<u8> {
        self.inbox.borrow_mut().inbox.drain(..).collect()
    }
}

/// A `CryptoProvider` that panics on any actual cryptographic operation.
/// Only valid for tests exercising plaintext-only paths (unencrypted
/// records, handshake message framing) where a provider is required by a
/// type signature but never actually invoked.
pub struct NullProvider;

impl CryptoProvider for NullProvider {
    fn random(&self, _out: &mut [u8]) -> Result<(), TlsError> {
        Err(TlsError::InternalError)
    }

    fn mac(&self, _algorithm: MacAlgorithm, _key: &[u8]) -> Box<dyn Mac> {
        panic!("NullProvider::mac called")
    }

    fn hash(&self, _prf: PrfHash) -> Box<dyn Hash> {
        panic!("NullProvider::hash called")
    }

    fn prf(
        &self,
        _hash: PrfHash,
        _secret: &[u8],
        _label: &[u8],
        _seed: &[u8],
        _out: &mut [u8],
    ) -> Result<(), TlsError> {
        Err(TlsError::InternalError)
    }

    fn cipher(
        &self,
        _spec: BulkCipherSpec,
        _key: &[u8],
        _iv: &[u8],
    ) -> Result<Box<dyn Encrypt>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn decipher(
        &self,
        _spec: BulkCipherSpec,
        _key: &[u8],
        _iv: &[u8],
    ) -> Result<Box<dyn Decrypt>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn rsa_public_key(&self, _der: &[u8]) -> Result<Box<dyn VerifyKey>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn rsa_encrypt(&self, _public_key_der: &[u8], _data: &[u8]) -> Result<Vec<u8>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn rsa_decrypt(&self, _private_key_der: &[u8], _data: &[u8]) -> Result<Vec<u8>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn verify_signature(
        &self,
        _public_key_der: &[u8],
        _hash: u8,
        _sign: u8,
        _message: &[u8],
        _signature: &[u8],
    ) -> Result<(), TlsError> {
        Err(TlsError::InternalError)
    }

    fn sign(&self, _private_key_der: &[u8], _hash: u8, _sign: u8, _message: &[u8]) -> Result<Vec<u8>, TlsError> {
        Err(TlsError::InternalError)
    }

    fn generate_ecdhe(&self, _named_curve: u16) -> Result<Box<dyn EcdhePrivateKey>, TlsError> {
        Err(TlsError::InternalError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_round_trip() {
        let (a, b) = Pipe::pair();
        a.send(b"hello");
        assert_eq!(b.recv_all(), b"hello");
        b.send(b"world");
        assert_eq!(a.recv_all(), b"world");
    }
}
