// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! P-256 (secp256r1) ECDHE (RFC 4492 §5.10). The premaster secret is the
//! raw X-coordinate of the shared point, not a KDF-derived value — `p256`'s
//! `SharedSecret::raw_secret_bytes` is exactly that.

use crate::crypto_provider::EcdhePrivateKey;
use crate::error::TlsError;
use alloc::boxed::Box;
use alloc::vec::Vec;
use p256::ecdh::EphemeralSecret;
use p256::PublicKey;

/// The only named curve this provider's `generate_ecdhe` supports.
const NAMED_CURVE_SECP256R1: u16 = 23;

pub fn generate(named_curve: u16) -> Result<Box<dyn EcdhePrivateKey>, TlsError> {
    if named_curve != NAMED_CURVE_SECP256R1 {
        return Err(TlsError::InternalError);
    }
    let secret = EphemeralSecret::random(&mut rand::rngs::OsRng);
    let public = PublicKey::from(&secret);
    Ok(Box::new(P256Key { secret, public }))
}

struct P256Key {
    secret: EphemeralSecret,
    public: PublicKey,
}

impl EcdhePrivateKey for P256Key {
    fn public_bytes(&self) -> Vec<u8> {
        self.public.to_encoded_point(false).as_bytes().to_vec()
    }

    fn derive(&self, peer_public: &[u8]) -> Result<Vec<u8>, TlsError> {
        let peer = PublicKey::from_sec1_bytes(peer_public).map_err(|_| TlsError::HandshakeFailure)?;
        let shared = self.secret.diffie_hellman(&peer);
        Ok(shared.raw_secret_bytes().to_vec())
    }
}
