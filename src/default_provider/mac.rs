// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! HMAC record MACs and the two transcript-hash shapes the PRF needs:
//! plain SHA-256 for TLS 1.2 suites, and the legacy MD5+SHA1 concatenation
//! (RFC 2246 §5 / §7.4.9) for TLS 1.0/1.1 suites.

use crate::crypto_provider::{Hash as HashTrait, Mac as MacTrait};
use crate::suite::{MacAlgorithm, PrfHash};
use alloc::boxed::Box;
use alloc::vec::Vec;
use digest::Digest;
use hmac::Mac as _;

pub enum HmacMac {
    Sha1(hmac::Hmac<sha1::Sha1>),
    Sha256(hmac::Hmac<sha2::Sha256>),
}

impl HmacMac {
    pub fn new(algorithm: MacAlgorithm, key: &[u8]) -> Box<dyn MacTrait> {
        match algorithm {
            MacAlgorithm::HmacSha1 => Box::new(HmacMac::Sha1(
                hmac::Hmac::<sha1::Sha1>::new_from_slice(key).expect("HMAC accepts any key length"),
            )),
            MacAlgorithm::HmacSha256 => Box::new(HmacMac::Sha256(
                hmac::Hmac::<sha2::Sha256>::new_from_slice(key).expect("HMAC accepts any key length"),
            )),
        }
    }
}

impl MacTrait for HmacMac {
    fn update(&mut self, data: &[u8]) {
        match self {
            HmacMac::Sha1(m) => m.update(data),
            HmacMac::Sha256(m) => m.update(data),
        }
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        match *self {
            HmacMac::Sha1(m) => m.finalize().into_bytes().to_vec(),
            HmacMac::Sha256(m) => m.finalize().into_bytes().to_vec(),
        }
    }
}

pub enum TranscriptHash {
    Sha256(sha2::Sha256),
    Md5Sha1(md5::Md5, sha1::Sha1),
}

impl TranscriptHash {
    pub fn new(prf: PrfHash) -> Box<dyn HashTrait> {
        match prf {
            PrfHash::Sha256 => Box::new(TranscriptHash::Sha256(sha2::Sha256::new())),
            PrfHash::Md5Sha1 => Box::new(TranscriptHash::Md5Sha1(md5::Md5::new(), sha1::Sha1::new())),
        }
    }
}

impl HashTrait for TranscriptHash {
    fn update(&mut self, data: &[u8]) {
        match self {
            TranscriptHash::Sha256(h) => Digest::update(h, data),
            TranscriptHash::Md5Sha1(md5, sha1) => {
                Digest::update(md5, data);
                Digest::update(sha1, data);
            }
        }
    }

    fn finish(self: Box<Self>) -> Vec<u8> {
        match *self {
            TranscriptHash::Sha256(h) => h.finalize().to_vec(),
            TranscriptHash::Md5Sha1(md5, sha1) => {
                let mut out = md5.finalize().to_vec();
                out.extend_from_slice(&sha1.finalize());
                out
            }
        }
    }
}
