// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Ambient endpoint configuration (SPEC_FULL.md §2.3): the negotiation
//! policy and, for a server, the credential the handshake authenticates
//! with. Split from [`crate::session::Session`] the way
//! `s2n-quic-core`'s endpoint/connection config separates static policy
//! from per-connection state.

use crate::suite::CipherSuite;
use crate::version::ProtocolVersion;
use alloc::vec::Vec;

/// Negotiation policy shared by both roles.
#[derive(Clone, Debug)]
pub struct Policy {
    pub min_version: ProtocolVersion,
    pub max_version: ProtocolVersion,
    /// Offered/accepted suites, highest preference first.
    pub cipher_suites: Vec<CipherSuite>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_version: ProtocolVersion::TLS1_0,
            max_version: ProtocolVersion::TLS1_2,
            cipher_suites: alloc::vec![
                CipherSuite::TlsEcdheRsaWithAes256CbcSha384,
                CipherSuite::TlsEcdheRsaWithAes128CbcSha,
                CipherSuite::TlsRsaWithAes256CbcSha256,
                CipherSuite::TlsRsaWithAes128CbcSha256,
                CipherSuite::TlsRsaWithAes256CbcSha,
                CipherSuite::TlsRsaWithAes128CbcSha,
                CipherSuite::TlsRsaWithRc4128Sha,
            ],
        }
    }
}

impl Policy {
    pub fn supports(&self, version: ProtocolVersion) -> bool {
        version >= self.min_version && version <= self.max_version
    }
}

/// The server's signing/decryption credential: a DER certificate chain
/// (leaf-first) and the matching DER-encoded private key. Opaque to this
/// crate beyond being handed to [`crate::crypto_provider::CryptoProvider`].
#[derive(Clone, Debug)]
pub struct Credential {
    pub certificate_chain: Vec<Vec<u8>>,
    pub private_key_der: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub policy: Policy,
    /// Required for a server; unused for a client (spec §1: no client
    /// certificate authentication).
    pub credential: Option<Credential>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_supports_tls12() {
        let policy = Policy::default();
        assert!(policy.supports(ProtocolVersion::TLS1_2));
        assert!(!policy.supports(ProtocolVersion::from_u16(0x0300)));
    }
}
