// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The cryptographic-primitive collaborator (spec §6): every low-level
//! operation this core needs but does not implement itself. Modeled the
//! way `s2n-quic-core::crypto::Key` draws the line between "the protocol
//! engine" and "the bytes come from somewhere else" — here the boundary
//! sits one layer lower, at individual primitives rather than a
//! record-protection codec, because TLS 1.0-1.2 needs raw access to MAC,
//! RSA, and ECDHE operations to implement its own record protection.
//!
//! [`crate::default_provider`] is the one concrete implementation this
//! crate ships, built on the RustCrypto ecosystem; any other
//! implementation (backed by a platform keystore, an HSM, a different
//! crypto library) only needs to satisfy this trait.

use alloc::vec::Vec;
use crate::error::TlsError;
use crate::suite::{BulkCipherSpec, MacAlgorithm, PrfHash};

/// A running MAC computation.
pub trait Mac {
    fn update(&mut self, data: &[u8]);
    fn finish(self: alloc::boxed::Box<Self>) -> Vec<u8>;
}

/// A running hash computation, used for the handshake transcript digest.
pub trait Hash {
    fn update(&mut self, data: &[u8]);
    fn finish(self: alloc::boxed::Box<Self>) -> Vec<u8>;
}

/// A bulk-cipher encryption stream keyed for one direction of one epoch.
pub trait Encrypt {
    /// Encrypts `input` into `output`, returning the number of bytes
    /// written (may exceed `input.len()` for CBC padding).
    fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError>;
}

/// A bulk-cipher decryption stream keyed for one direction of one epoch.
pub trait Decrypt {
    /// Decrypts `input` into `output` in place-compatible fashion,
    /// returning the number of plaintext bytes recovered (less than
    /// `input.len()` once CBC padding is stripped).
    fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, TlsError>;
}

/// An ephemeral ECDHE key pair for one handshake.
pub trait EcdhePrivateKey {
    /// The uncompressed public point, ready for `ServerECDHParams.public`
    /// or `ClientKeyExchange`'s ECDHE variant.
    fn public_bytes(&self) -> Vec<u8>;
    /// Computes the shared X-coordinate premaster secret against the
    /// peer's public point.
    fn derive(&self, peer_public: &[u8]) -> Result<Vec<u8>, TlsError>;
}

/// A parsed peer certificate's public key, used only to verify a
/// `ServerKeyExchange` signature (leaf certificate chain *validation* is
/// out of scope, see [`crate::certs`]).
pub trait VerifyKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), TlsError>;
}

/// The external cryptographic collaborator (spec §6).
///
/// Every method that can fail returns `TlsError` so a provider failure
/// (bad key material, unsupported curve, signature mismatch) maps
/// directly onto a wire alert without a separate error type.
pub trait CryptoProvider {
    /// Fills `out` with cryptographically secure random bytes — the
    /// source of both `Random.random_bytes` and PRF-independent nonces.
    fn random(&self, out: &mut [u8]) -> Result<(), TlsError>;

    fn mac(&self, algorithm: MacAlgorithm, key: &[u8]) -> alloc::boxed::Box<dyn Mac>;

    fn hash(&self, prf: PrfHash) -> alloc::boxed::Box<dyn Hash>;

    /// TLS PRF: `PRF(secret, label, seed)`, truncated/extended to exactly
    /// `out.len()` bytes (RFC 5246 §5).
    fn prf(
        &self,
        hash: PrfHash,
        secret: &[u8],
        label: &[u8],
        seed: &[u8],
        out: &mut [u8],
    ) -> Result<(), TlsError>;

    fn cipher(
        &self,
        spec: BulkCipherSpec,
        key: &[u8],
        iv: &[u8],
    ) -> Result<alloc::boxed::Box<dyn Encrypt>, TlsError>;

    fn decipher(
        &self,
        spec: BulkCipherSpec,
        key: &[u8],
        iv: &[u8],
    ) -> Result<alloc::boxed::Box<dyn Decrypt>, TlsError>;

    /// Parses a DER `SubjectPublicKeyInfo` RSA public key, for
    /// `encrypt_public`.
    fn rsa_public_key(&self, der: &[u8]) -> Result<alloc::boxed::Box<dyn VerifyKey>, TlsError>;

    /// PKCS#1 v1.5 encrypts `data` (the `PreMasterSecret`) under the
    /// server's RSA public key.
    fn rsa_encrypt(&self, public_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError>;

    /// PKCS#1 v1.5 decrypts `data` under the server's RSA private key.
    /// Implementations must defend against Bleichenbacher's attack by
    /// never letting decryption failure be distinguishable in timing from
    /// a structurally-valid-but-wrong result (spec §4.4 "Bleichenbacher").
    fn rsa_decrypt(&self, private_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError>;

    /// Verifies a `ServerKeyExchange` or `CertificateVerify` signature.
    fn verify_signature(
        &self,
        public_key_der: &[u8],
        hash: u8,
        sign: u8,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), TlsError>;

    /// Signs `message` (an ECDHE `ServerKeyExchange`'s params) with the
    /// server's private key.
    fn sign(
        &self,
        private_key_der: &[u8],
        hash: u8,
        sign: u8,
        message: &[u8],
    ) -> Result<Vec<u8>, TlsError>;

    /// Generates an ephemeral ECDHE key pair for `named_curve`.
    fn generate_ecdhe(&self, named_curve: u16) -> Result<alloc::boxed::Box<dyn EcdhePrivateKey>, TlsError>;
}
