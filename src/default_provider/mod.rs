// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The one concrete [`CryptoProvider`] this crate ships (spec §6's
//! "external collaborator", realized on the RustCrypto ecosystem):
//! AES-CBC/RC4 bulk ciphers, HMAC-SHA1/SHA256 MACs, the TLS PRF, RSA
//! PKCS#1v1.5 key exchange and signatures, and P-256 ECDHE.
//!
//! Feature-gated behind `default-provider`; the `certs` collaborator
//! boundary (spec §6) means `*_der` parameters here are plain
//! `SubjectPublicKeyInfo`/PKCS#8 DER, not parsed X.509 certificates — this
//! crate never parses a certificate chain, so callers supply key material
//! directly (see `DESIGN.md`).

mod cipher;
mod ecdhe;
mod mac;
mod prf;
mod rsa_ops;

use crate::crypto_provider::{CryptoProvider, Decrypt, EcdhePrivateKey, Encrypt, Hash, Mac as MacTrait, VerifyKey};
use crate::error::TlsError;
use crate::suite::{BulkCipherSpec, MacAlgorithm, PrfHash};
use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::RngCore;

/// The default `CryptoProvider`: stateless, backed entirely by RustCrypto
/// primitives instantiated fresh per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultProvider;

impl CryptoProvider for DefaultProvider {
    fn random(&self, out: &mut [u8]) -> Result<(), TlsError> {
        rand::rngs::OsRng.fill_bytes(out);
        Ok(())
    }

    fn mac(&self, algorithm: MacAlgorithm, key: &[u8]) -> Box<dyn MacTrait> {
        mac::HmacMac::new(algorithm, key)
    }

    fn hash(&self, prf: PrfHash) -> Box<dyn Hash> {
        mac::TranscriptHash::new(prf)
    }

    fn prf(
        &self,
        hash: PrfHash,
        secret: &[u8],
        label: &[u8],
        seed: &[u8],
        out: &mut [u8],
    ) -> Result<(), TlsError> {
        prf::prf(hash, secret, label, seed, out)
    }

    fn cipher(&self, spec: BulkCipherSpec, key: &[u8], iv: &[u8]) -> Result<Box<dyn Encrypt>, TlsError> {
        cipher::new_encrypt(spec, key, iv)
    }

    fn decipher(&self, spec: BulkCipherSpec, key: &[u8], iv: &[u8]) -> Result<Box<dyn Decrypt>, TlsError> {
        cipher::new_decrypt(spec, key, iv)
    }

    fn rsa_public_key(&self, der: &[u8]) -> Result<Box<dyn VerifyKey>, TlsError> {
        rsa_ops::public_key(der)
    }

    fn rsa_encrypt(&self, public_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError> {
        rsa_ops::encrypt(public_key_der, data)
    }

    fn rsa_decrypt(&self, private_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError> {
        rsa_ops::decrypt(private_key_der, data)
    }

    fn verify_signature(
        &self,
        public_key_der: &[u8],
        hash: u8,
        sign: u8,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), TlsError> {
        rsa_ops::verify_signature(public_key_der, hash, sign, message, signature)
    }

    fn sign(&self, private_key_der: &[u8], hash: u8, sign: u8, message: &[u8]) -> Result<Vec<u8>, TlsError> {
        rsa_ops::sign(private_key_der, hash, sign, message)
    }

    fn generate_ecdhe(&self, named_curve: u16) -> Result<Box<dyn EcdhePrivateKey>, TlsError> {
        ecdhe::generate(named_curve)
    }
}
