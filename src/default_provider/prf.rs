// Copyright classic-tls-core authors.
// SPDX-License-Identifier: Apache-2.0

//! The TLS PRF (RFC 5246 §5): `P_hash` iterated HMAC expansion, and the
//! TLS 1.0/1.1 MD5+SHA1 split construction (RFC 2246 §5) that XORs two
//! independent `P_hash` outputs over secret halves that overlap by one
//! byte when the secret's length is odd.

use crate::error::TlsError;
use crate::suite::PrfHash;
use hmac::Mac as _;

pub fn prf(
    hash: PrfHash,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
    out: &mut [u8],
) -> Result<(), TlsError> {
    let mut label_seed = alloc::vec::Vec::with_capacity(label.len() + seed.len());
    label_seed.extend_from_slice(label);
    label_seed.extend_from_slice(seed);

    match hash {
        PrfHash::Sha256 => {
            p_hash::<sha2::Sha256>(secret, &label_seed, out);
            Ok(())
        }
        PrfHash::Md5Sha1 => {
            let half = secret.len().div_ceil(2);
            let s1 = &secret[..half];
            let s2 = &secret[secret.len() - half..];

            let mut md5_out = alloc::vec![0u8; out.len()];
            p_hash::<md5::Md5>(s1, &label_seed, &mut md5_out);
            let mut sha1_out = alloc::vec![0u8; out.len()];
            p_hash::<sha1::Sha1>(s2, &label_seed, &mut sha1_out);

            for ((o, a), b) in out.iter_mut().zip(md5_out.iter()).zip(sha1_out.iter()) {
                *o = a ^ b;
            }
            Ok(())
        }
    }
}

/// `P_hash(secret, seed) = HMAC(secret, A(1) + seed) || HMAC(secret, A(2) + seed) || ...`
/// where `A(0) = seed` and `A(i) = HMAC(secret, A(i-1))`.
fn p_hash<D>(secret: &[u8], seed: &[u8], out: &mut [u8])
where
    D: digest::Digest + digest::core_api::BlockSizeUser + digest::FixedOutputReset + Clone,
{
    type HmacOf<D> = hmac::Hmac<D>;

    let mut a: alloc::vec::Vec<u8> = seed.to_vec();
    let mut written = 0;
    while written < out.len() {
        let mut a_mac = HmacOf::<D>::new_from_slice(secret).expect("HMAC accepts any key length");
        a_mac.update(&a);
        a = a_mac.finalize().into_bytes().to_vec();

        let mut round = HmacOf::<D>::new_from_slice(secret).expect("HMAC accepts any key length");
        round.update(&a);
        round.update(seed);
        let block = round.finalize().into_bytes();

        let take = core::cmp::min(block.len(), out.len() - written);
        out[written..written + take].copy_from_slice(&block[..take]);
        written += take;
    }
}
