// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! Certificate chain utilities (spec §6): leaf selection only. Chain
//! validation (trust anchors, revocation, name matching) is an external
//! collaborator's job this core never performs — it only needs the leaf's
//! public key to verify a `ServerKeyExchange` signature or to RSA-encrypt
//! a `PreMasterSecret`.

use crate::error::TlsError;
use crate::handshake::Certificate;

/// Returns the leaf (first) certificate's raw DER bytes, the one
/// `ServerKeyExchange`/RSA key-exchange operations are performed against.
///
/// RFC 5246 §7.4.2 orders the chain leaf-first; this does not verify that
/// ordering or that the chain is non-empty beyond this check.
pub fn leaf<'a>(certificate: &'a Certificate) -> Result<&'a [u8], TlsError> {
    certificate
        .chain
        .first()
        .map(Vec::as_slice)
        .ok_or(TlsError::BadCertificate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_of_empty_chain_is_rejected() {
        let cert = Certificate { chain: alloc::vec::Vec::new() };
        assert!(leaf(&cert).is_err());
    }

    #[test]
    fn leaf_is_first_entry() {
        let cert = Certificate {
            chain: alloc::vec![b"leaf".to_vec(), b"intermediate".to_vec()],
        };
        assert_eq!(leaf(&cert).unwrap(), b"leaf");
    }
}
