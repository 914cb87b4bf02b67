// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The TLS pseudo-random function and the derivations built on it:
//! `master_secret`, the key block, and `finished.verify_data` (RFC 5246
//! §5, §6.3, §7.4.9; RFC 2246 §5 for the TLS <= 1.1 MD5+SHA1 split that
//! [`crate::suite::PrfHash::Md5Sha1`] selects).

use crate::crypto_provider::CryptoProvider;
use crate::error::TlsError;
use crate::suite::PrfHash;
use alloc::vec;
use alloc::vec::Vec;

//= https://www.rfc-editor.org/rfc/rfc5246#section-8.1
//# master_secret = PRF(pre_master_secret, "master secret",
//#                      ClientHello.random + ServerHello.random)
//#                      [0..47];
pub const MASTER_SECRET_LABEL: &[u8] = b"master secret";

//= https://www.rfc-editor.org/rfc/rfc5246#section-6.3
//# key_block = PRF(SecurityParameters.master_secret,
//#                  "key expansion",
//#                  SecurityParameters.server_random +
//#                  SecurityParameters.client_random);
pub const KEY_EXPANSION_LABEL: &[u8] = b"key expansion";

pub const CLIENT_FINISHED_LABEL: &[u8] = b"client finished";
pub const SERVER_FINISHED_LABEL: &[u8] = b"server finished";

pub const MASTER_SECRET_LEN: usize = 48;

/// `PRF(secret, label, seed)`, extended to exactly `out.len()` bytes.
/// Delegates the actual HMAC/hash iteration to the crypto provider, which
/// is free to implement it however its backing library prefers (spec §6:
/// "`prf(name)(secret, label, seeds) -> {read(n)}`").
pub fn prf(
    provider: &dyn CryptoProvider,
    hash: PrfHash,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
    out: &mut [u8],
) -> Result<(), TlsError> {
    provider.prf(hash, secret, label, seed, out)
}

/// Derives the 48-byte `master_secret` from the premaster secret and both
/// hello randoms.
pub fn master_secret(
    provider: &dyn CryptoProvider,
    hash: PrfHash,
    pre_master_secret: &[u8],
    client_random: &[u8; 32],
    server_random: &[u8; 32],
) -> Result<[u8; MASTER_SECRET_LEN], TlsError> {
    let mut seed = Vec::with_capacity(64);
    seed.extend_from_slice(client_random);
    seed.extend_from_slice(server_random);

    let mut out = [0u8; MASTER_SECRET_LEN];
    prf(provider, hash, pre_master_secret, MASTER_SECRET_LABEL, &seed, &mut out)?;
    Ok(out)
}

/// The six key-block fields, in RFC 5246 §6.3 order: client write MAC
/// key, server write MAC key, client write key, server write key, client
/// write IV, server write IV (the IV fields are empty for AEAD/stream
/// ciphers that derive their own nonces; this core's CBC suites use
/// them).
pub struct KeyBlock {
    pub client_write_mac_key: Vec<u8>,
    pub server_write_mac_key: Vec<u8>,
    pub client_write_key: Vec<u8>,
    pub server_write_key: Vec<u8>,
    pub client_write_iv: Vec<u8>,
    pub server_write_iv: Vec<u8>,
}

/// Expands `master_secret` into the key block and splits it per RFC 5246
/// §6.3's fixed field order.
pub fn key_block(
    provider: &dyn CryptoProvider,
    hash: PrfHash,
    master_secret: &[u8],
    client_random: &[u8; 32],
    server_random: &[u8; 32],
    mac_key_len: usize,
    enc_key_len: usize,
    iv_len: usize,
) -> Result<KeyBlock, TlsError> {
    let mut seed = Vec::with_capacity(64);
    seed.extend_from_slice(server_random);
    seed.extend_from_slice(client_random);

    let total = 2 * mac_key_len + 2 * enc_key_len + 2 * iv_len;
    let mut block = vec![0u8; total];
    prf(provider, hash, master_secret, KEY_EXPANSION_LABEL, &seed, &mut block)?;

    let mut cursor = 0;
    let mut take = |len: usize| {
        let slice = block[cursor..cursor + len].to_vec();
        cursor += len;
        slice
    };

    Ok(KeyBlock {
        client_write_mac_key: take(mac_key_len),
        server_write_mac_key: take(mac_key_len),
        client_write_key: take(enc_key_len),
        server_write_key: take(enc_key_len),
        client_write_iv: take(iv_len),
        server_write_iv: take(iv_len),
    })
}

/// Computes `finished.verify_data` (always 12 bytes for every suite this
/// registry defines) over the running handshake transcript hash.
pub fn verify_data(
    provider: &dyn CryptoProvider,
    hash: PrfHash,
    master_secret: &[u8],
    label: &[u8],
    transcript_hash: &[u8],
    verify_len: usize,
) -> Result<Vec<u8>, TlsError> {
    let mut out = vec![0u8; verify_len];
    prf(provider, hash, master_secret, label, transcript_hash, &mut out)?;
    Ok(out)
}
