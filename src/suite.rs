// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Cipher suite registry: the static table mapping a suite's wire code to
//! its authentication kind, key-exchange kind, bulk cipher, MAC, and PRF
//! hash (spec §2 "Constants & tables", §4.4 "Suite info").

use crate::error::TlsError;
use crate::version::ProtocolVersion;

/// How the server authenticates itself. This core only ever negotiates
/// `Rsa` (spec §1 scope: no client-certificate authentication, no DHE).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthKind {
    Rsa,
}

/// How the premaster secret is established.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyExchangeKind {
    Rsa,
    Ecdhe,
    /// Anonymous ECDH: no `ServerKeyExchange` signature is verified.
    EcdhAnon,
}

/// Bulk cipher mode: CBC suites carry an explicit (TLS >= 1.1) or chained
/// (TLS 1.0) IV; stream suites (e.g. RC4) carry none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulkCipherKind {
    Stream,
    Cbc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BulkCipherSpec {
    pub kind: BulkCipherKind,
    pub key_len: usize,
    pub iv_len: usize,
    pub block_size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    HmacSha1,
    HmacSha256,
}

impl MacAlgorithm {
    pub const fn mac_len(self) -> usize {
        match self {
            MacAlgorithm::HmacSha1 => 20,
            MacAlgorithm::HmacSha256 => 32,
        }
    }

    pub const fn mac_key_len(self) -> usize {
        self.mac_len()
    }
}

/// The PRF's underlying hash. TLS <= 1.1 always uses the fixed MD5+SHA1
/// split PRF regardless of suite; TLS 1.2 uses HMAC over the suite's own
/// PRF hash (spec §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrfHash {
    Md5Sha1,
    Sha256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SuiteInfo {
    pub suite: CipherSuite,
    pub auth: AuthKind,
    pub kx: KeyExchangeKind,
    pub bulk: BulkCipherSpec,
    pub mac: MacAlgorithm,
    pub prf: PrfHash,
    pub min_version: ProtocolVersion,
    pub verify_len: usize,
}

macro_rules! suites {
    ($(
        $variant:ident = $code:expr => {
            kx: $kx:expr, bulk: $bulk:expr, mac: $mac:expr, prf: $prf:expr, min: $min:expr $(,)?
        }
    ),* $(,)?) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum CipherSuite {
            $($variant),*
        }

        impl CipherSuite {
            pub const fn as_u16(self) -> u16 {
                match self {
                    $(CipherSuite::$variant => $code),*
                }
            }

            pub const fn from_u16(code: u16) -> Option<Self> {
                match code {
                    $($code => Some(CipherSuite::$variant),)*
                    _ => None,
                }
            }

            pub const fn info(self) -> SuiteInfo {
                match self {
                    $(
                        CipherSuite::$variant => SuiteInfo {
                            suite: CipherSuite::$variant,
                            auth: AuthKind::Rsa,
                            kx: $kx,
                            bulk: $bulk,
                            mac: $mac,
                            prf: $prf,
                            min_version: $min,
                            verify_len: 12,
                        },
                    )*
                }
            }
        }
    };
}

const AES_128_CBC: BulkCipherSpec = BulkCipherSpec {
    kind: BulkCipherKind::Cbc,
    key_len: 16,
    iv_len: 16,
    block_size: 16,
};
const AES_256_CBC: BulkCipherSpec = BulkCipherSpec {
    kind: BulkCipherKind::Cbc,
    key_len: 32,
    iv_len: 16,
    block_size: 16,
};
const RC4_128: BulkCipherSpec = BulkCipherSpec {
    kind: BulkCipherKind::Stream,
    key_len: 16,
    iv_len: 0,
    block_size: 1,
};

suites! {
    TlsRsaWithAes128CbcSha = 0x002f => {
        kx: KeyExchangeKind::Rsa, bulk: AES_128_CBC, mac: MacAlgorithm::HmacSha1,
        prf: PrfHash::Md5Sha1, min: ProtocolVersion::TLS1_0,
    },
    TlsRsaWithAes256CbcSha = 0x0035 => {
        kx: KeyExchangeKind::Rsa, bulk: AES_256_CBC, mac: MacAlgorithm::HmacSha1,
        prf: PrfHash::Md5Sha1, min: ProtocolVersion::TLS1_0,
    },
    TlsRsaWithAes128CbcSha256 = 0x003c => {
        kx: KeyExchangeKind::Rsa, bulk: AES_128_CBC, mac: MacAlgorithm::HmacSha256,
        prf: PrfHash::Sha256, min: ProtocolVersion::TLS1_2,
    },
    TlsRsaWithAes256CbcSha256 = 0x003d => {
        kx: KeyExchangeKind::Rsa, bulk: AES_256_CBC, mac: MacAlgorithm::HmacSha256,
        prf: PrfHash::Sha256, min: ProtocolVersion::TLS1_2,
    },
    TlsRsaWithRc4128Sha = 0x0005 => {
        kx: KeyExchangeKind::Rsa, bulk: RC4_128, mac: MacAlgorithm::HmacSha1,
        prf: PrfHash::Md5Sha1, min: ProtocolVersion::TLS1_0,
    },
    TlsEcdheRsaWithAes128CbcSha = 0xc013 => {
        kx: KeyExchangeKind::Ecdhe, bulk: AES_128_CBC, mac: MacAlgorithm::HmacSha1,
        prf: PrfHash::Md5Sha1, min: ProtocolVersion::TLS1_0,
    },
    TlsEcdheRsaWithAes256CbcSha384 = 0xc028 => {
        kx: KeyExchangeKind::Ecdhe, bulk: AES_256_CBC, mac: MacAlgorithm::HmacSha256,
        prf: PrfHash::Sha256, min: ProtocolVersion::TLS1_2,
    },
    TlsEcdhAnonWithAes256CbcSha = 0xc019 => {
        kx: KeyExchangeKind::EcdhAnon, bulk: AES_256_CBC, mac: MacAlgorithm::HmacSha1,
        prf: PrfHash::Md5Sha1, min: ProtocolVersion::TLS1_0,
    },
}

/// Walks `ours` in priority order and returns the first suite also offered
/// by `theirs`, restricted to suites whose `min_version <= version` (spec
/// §4.4 "Cipher selection"). Authentication kind is always `Rsa` in this
/// core, so no further restriction is applied there.
pub fn select(
    ours: &[CipherSuite],
    theirs: &[CipherSuite],
    version: ProtocolVersion,
) -> Result<CipherSuite, TlsError> {
    for candidate in ours {
        if theirs.contains(candidate) {
            let info = candidate.info();
            if info.min_version <= version {
                return Ok(*candidate);
            }
        }
    }
    Err(TlsError::HandshakeFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_codes() {
        for suite in [
            CipherSuite::TlsRsaWithAes128CbcSha,
            CipherSuite::TlsEcdheRsaWithAes128CbcSha,
            CipherSuite::TlsEcdhAnonWithAes256CbcSha,
        ] {
            assert_eq!(CipherSuite::from_u16(suite.as_u16()), Some(suite));
        }
    }

    #[test]
    fn selection_respects_min_version() {
        let ours = [CipherSuite::TlsRsaWithAes128CbcSha256];
        let theirs = [CipherSuite::TlsRsaWithAes128CbcSha256];
        assert!(select(&ours, &theirs, ProtocolVersion::TLS1_0).is_err());
        assert!(select(&ours, &theirs, ProtocolVersion::TLS1_2).is_ok());
    }

    #[test]
    fn selection_falls_through_priority() {
        let ours = [
            CipherSuite::TlsEcdheRsaWithAes256CbcSha384,
            CipherSuite::TlsRsaWithAes128CbcSha,
        ];
        let theirs = [CipherSuite::TlsRsaWithAes128CbcSha];
        assert_eq!(
            select(&ours, &theirs, ProtocolVersion::TLS1_2).unwrap(),
            CipherSuite::TlsRsaWithAes128CbcSha
        );
    }
}
