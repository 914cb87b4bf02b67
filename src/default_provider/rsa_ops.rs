// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! RSA PKCS#1 v1.5 key transport and signatures (RFC 5246 §7.4.7.1,
//! §7.4.1.4.1). Only the `rsa_pkcs1_sha256` signature scheme is
//! implemented — this provider targets the TLS 1.2 ECDHE suites in
//! `suite.rs`, not the legacy implicit MD5+SHA1 scheme TLS 1.0/1.1 used
//! before `signature_algorithms` existed.
//!
//! `*_der` parameters are `SubjectPublicKeyInfo`/PKCS#8 DER, never a
//! parsed X.509 certificate — see [`crate::default_provider`]'s module
//! docs.

use crate::crypto_provider::VerifyKey;
use crate::error::TlsError;
use alloc::boxed::Box;
use alloc::vec::Vec;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

const HASH_SHA256: u8 = 4;
const SIGN_RSA: u8 = 1;

pub struct RsaVerifyKey(RsaPublicKey);

impl VerifyKey for RsaVerifyKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), TlsError> {
        verify(&self.0, HASH_SHA256, SIGN_RSA, message, signature)
    }
}

pub fn public_key(der: &[u8]) -> Result<Box<dyn VerifyKey>, TlsError> {
    let key = RsaPublicKey::from_public_key_der(der).map_err(|_| TlsError::BadCertificate)?;
    Ok(Box::new(RsaVerifyKey(key)))
}

pub fn encrypt(public_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError> {
    let key = RsaPublicKey::from_public_key_der(public_key_der).map_err(|_| TlsError::BadCertificate)?;
    key.encrypt(&mut rand::rngs::OsRng, Pkcs1v15Encrypt, data)
        .map_err(|_| TlsError::InternalError)
}

pub fn decrypt(private_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, TlsError> {
    let key = RsaPrivateKey::from_pkcs8_der(private_key_der).map_err(|_| TlsError::InternalError)?;
    key.decrypt(Pkcs1v15Encrypt, data).map_err(|_| TlsError::DecryptError)
}

fn verify(
    public_key: &RsaPublicKey,
    hash: u8,
    sign: u8,
    message: &[u8],
    signature_bytes: &[u8],
) -> Result<(), TlsError> {
    if hash != HASH_SHA256 || sign != SIGN_RSA {
        return Err(TlsError::InternalError);
    }
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    let signature = Signature::try_from(signature_bytes).map_err(|_| TlsError::DecodeError)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| TlsError::DecryptError)
}

pub fn verify_signature(
    public_key_der: &[u8],
    hash: u8,
    sign: u8,
    message: &[u8],
    signature: &[u8],
) -> Result<(), TlsError> {
    let key = RsaPublicKey::from_public_key_der(public_key_der).map_err(|_| TlsError::BadCertificate)?;
    verify(&key, hash, sign, message, signature)
}

pub fn sign(private_key_der: &[u8], hash: u8, sign: u8, message: &[u8]) -> Result<Vec<u8>, TlsError> {
    if hash != HASH_SHA256 || sign != SIGN_RSA {
        return Err(TlsError::InternalError);
    }
    let key = RsaPrivateKey::from_pkcs8_der(private_key_der).map_err(|_| TlsError::InternalError)?;
    let signing_key = SigningKey::<Sha256>::new(key);
    let signature: Signature = signing_key.sign(message);
    Ok(signature.to_vec())
}
